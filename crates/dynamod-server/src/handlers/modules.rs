//! Module metadata feeds.

use crate::server::AppState;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use dynamod_core::models::{ModuleAvailability, ModulesMetadata};
use std::sync::Arc;
use tracing::debug;

/// Client-facing metadata feed. Never cached by intermediaries.
pub async fn handle_modules_metadata(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let modules = state.resolver.registry().list().to_vec();
    debug!("Serving metadata for {} module(s)", modules.len());
    (
        [(header::CACHE_CONTROL, "no-cache")],
        Json(ModulesMetadata::new(modules)),
    )
}

/// Simplified availability list.
pub async fn handle_modules_list(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ModuleAvailability::from_descriptors(
        state.resolver.registry().list(),
    ))
}
