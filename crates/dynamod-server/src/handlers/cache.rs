//! Artifact cache administration.

use crate::server::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use dynamod_core::models::CacheClearResult;
use std::sync::Arc;
use tracing::info;

pub async fn handle_cache_clear(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cleared = state.resolver.cache().clear();
    info!("Cleared {} cached artifact(s)", cleared);
    Json(CacheClearResult::cleared(cleared))
}
