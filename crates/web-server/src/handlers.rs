use crate::{cache::DatasetKey, error::AppError, AppState};
use analytics::{
    AnalysisDataset, AnalysisParams, ExportMatrix, ImporterTotal, TradeSummary, YearlyTotal,
};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

impl AppState {
    fn dataset_key(&self) -> DatasetKey {
        let analysis = &self.config.analysis;
        DatasetKey {
            transactions_path: self.config.data.transactions_path.clone(),
            reference_path: self.config.data.reference_path.clone(),
            params: AnalysisParams {
                product: analysis.product,
                year_min: analysis.year_min,
                year_max: analysis.year_max,
                seed: analysis.seed,
                top_n: analysis.top_n,
            },
        }
    }

    /// Fetches the memoized dataset, loading and transforming on first use.
    pub fn dataset(&self) -> Result<Arc<AnalysisDataset>, AppError> {
        let key = self.dataset_key();
        self.cache.get_or_compute(&key, || {
            let transactions = ingest::load_transactions(&key.transactions_path)?;
            let countries = ingest::load_country_table(&key.reference_path)?;
            let dataset = self.engine.analyze(&transactions, &countries, &key.params)?;
            Ok::<_, AppError>(dataset)
        })
    }
}

/// # GET /api/summary
/// Headline metrics: record count, totals, guarded average unit price.
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TradeSummary>, AppError> {
    let dataset = state.dataset()?;
    Ok(Json(dataset.summary.clone()))
}

/// # GET /api/yearly
/// Total trade value per synthesized year, ascending.
pub async fn get_yearly(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<YearlyTotal>>, AppError> {
    let dataset = state.dataset()?;
    Ok(Json(dataset.yearly.clone()))
}

#[derive(Debug, Deserialize)]
pub struct ImporterQuery {
    /// Cap the number of rows returned, highest-ranked first.
    limit: Option<usize>,
}

/// # GET /api/importers
/// Per-importer totals, descending by value. The null-name bucket is included.
pub async fn get_importers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImporterQuery>,
) -> Result<Json<Vec<ImporterTotal>>, AppError> {
    let dataset = state.dataset()?;
    let mut importers = dataset.importers.clone();
    if let Some(limit) = query.limit {
        importers.truncate(limit);
    }
    Ok(Json(importers))
}

/// # GET /api/matrix
/// The top-N importer × year heatmap matrix.
pub async fn get_matrix(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExportMatrix>, AppError> {
    let dataset = state.dataset()?;
    Ok(Json(dataset.matrix.clone()))
}

/// # GET /api/export
/// The filtered-and-enriched dataset as a `t,i,j,k,v,q` CSV attachment.
pub async fn export_csv(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let dataset = state.dataset()?;
    let body = ingest::enriched_to_csv(&dataset.records)?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"trade_export.csv\"",
            ),
        ],
        body,
    ))
}

/// # POST /api/cache/clear
/// The explicit memoization invalidation hook.
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let dropped = state.cache.clear();
    tracing::info!(dropped, "Dataset cache cleared by request.");
    Json(json!({ "cleared": dropped }))
}
