//! HTTP server implementation using Axum.

use crate::handlers::{
    handle_cache_clear, handle_download, handle_health, handle_liveness, handle_modules_list,
    handle_modules_metadata, handle_root, handle_upload,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use dynamod_core::config::HttpConfig;
use dynamod_core::ArtifactResolver;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Application state shared across handlers.
pub struct AppState {
    /// Registry + cache + fetcher
    pub resolver: ArtifactResolver,
}

impl AppState {
    pub fn new(resolver: ArtifactResolver) -> Self {
        Self { resolver }
    }
}

/// Build the router with every route and the shared layers.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Module clients call from arbitrary origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/liveness_check", get(handle_liveness))
        .route("/api/v1/modules/metadata", get(handle_modules_metadata))
        .route("/api/v1/modules/list", get(handle_modules_list))
        .route("/download", post(handle_download))
        .route("/upload", post(handle_upload))
        .route("/cache/clear", post(handle_cache_clear))
        .layer(DefaultBodyLimit::max(HttpConfig::MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server.
///
/// Returns the actual address the server is bound to (useful when port=0).
pub async fn start_server(
    state: Arc<AppState>,
    host: &str,
    port: u16,
) -> anyhow::Result<SocketAddr> {
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("Server listening on {}", actual_addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    });

    Ok(actual_addr)
}
