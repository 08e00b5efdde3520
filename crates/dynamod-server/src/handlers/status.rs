//! Banner, health and liveness endpoints.

use crate::server::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use dynamod_core::models::{timestamp_now, HealthStatus, ServiceInfo};
use std::sync::Arc;

/// Service banner.
pub async fn handle_root() -> impl IntoResponse {
    Json(ServiceInfo::running(timestamp_now()))
}

/// Health check endpoint, reports the artifact cache size.
pub async fn handle_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cache_size = state.resolver.cache().size();
    Json(HealthStatus::up(timestamp_now(), cache_size))
}

/// Plain liveness probe.
pub async fn handle_liveness() -> &'static str {
    "OK"
}
