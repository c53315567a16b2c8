use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Ingest error: {0}")]
    Ingest(#[from] ingest::IngestError),
    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Ingest(ingest::IngestError::DataUnavailable(path)) => {
                tracing::warn!(path = %path.display(), "Input data unavailable.");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Trade data files are unavailable. Check the configured data paths."
                        .to_string(),
                )
            }
            AppError::Ingest(ingest_err) => {
                tracing::error!(error = ?ingest_err, "Ingest error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The input data could not be read".to_string(),
                )
            }
            AppError::Analytics(analytics_err) => {
                tracing::error!(error = ?analytics_err, "Analytics error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred during aggregation".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
