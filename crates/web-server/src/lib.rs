use analytics::AggregationEngine;
use axum::{
    routing::{get, post},
    Router,
};
use configuration::Config;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod cache;
pub mod error;
pub mod handlers;

use cache::DatasetCache;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub config: Config,
    pub engine: AggregationEngine,
    pub cache: DatasetCache,
}

/// The main function to configure and run the dashboard server.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let app_state = Arc::new(AppState {
        config,
        engine: AggregationEngine::new(),
        cache: DatasetCache::new(),
    });

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    // --- DEFINE THE APPLICATION ROUTES ---
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/yearly", get(handlers::get_yearly))
        .route("/api/importers", get(handlers::get_importers))
        .route("/api/matrix", get(handlers::get_matrix))
        .route("/api/export", get(handlers::export_csv))
        .route("/api/cache/clear", post(handlers::clear_cache))
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http());

    tracing::info!("Dashboard server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
