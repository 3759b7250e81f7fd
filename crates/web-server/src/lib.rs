use analytics::AnalyticsEngine;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use configuration::Config;
use core_types::TimeRange;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};
use trade_store::SnapshotRepository;

pub mod error;
pub mod handlers;
pub mod sorting;

/// The shared application state that all handlers can access.
///
/// Nothing in here is mutable: every request loads the snapshot and runs the
/// engine from scratch.
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: AnalyticsEngine,
    pub store: SnapshotRepository,
    pub default_time_range: TimeRange,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            engine: AnalyticsEngine::new(),
            store: SnapshotRepository::new(config.store.snapshot_path.clone()),
            default_time_range: config.analytics.default_time_range,
        }
    }
}

/// Builds the application router with all routes and middleware attached.
pub fn build_router(app_state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(handlers::health))
        .route(
            "/api/analytics",
            get(handlers::get_snapshot_analytics).post(handlers::compute_analytics),
        )
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit_bytes))
}

/// The main function to configure and run the web server.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    // Tracing is initialized by the binary, so it is not set up again here.
    let addr = config.server.socket_addr();
    let app_state = Arc::new(AppState::from_config(config));
    let app = build_router(app_state, config.server.body_limit_bytes);

    tracing::info!(
        %addr,
        snapshot = %config.store.snapshot_path.display(),
        "Web server listening."
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
