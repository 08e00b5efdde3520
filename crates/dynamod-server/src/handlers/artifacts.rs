//! Module package download and bundle upload.

use crate::error::ApiError;
use crate::server::AppState;
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use dynamod_core::config::HttpConfig;
use dynamod_core::models::UploadAck;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Query parameters of `POST /download`.
#[derive(Debug, Default, Deserialize)]
pub struct DownloadParams {
    pub variant: Option<String>,
    pub version: Option<String>,
    #[serde(rename = "application-id")]
    pub application_id: Option<String>,
    pub features: Option<String>,
    pub signature: Option<String>,
}

/// Query parameters of `POST /upload`.
#[derive(Debug, Default, Deserialize)]
pub struct UploadParams {
    pub variant: Option<String>,
    pub version: Option<String>,
    #[serde(rename = "application-id")]
    pub application_id: Option<String>,
}

/// Return the parameter if present and non-blank.
fn require_param<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ApiError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::bad_request(format!(
            "Missing required parameter: {}",
            name
        ))),
    }
}

/// First non-blank entry of a comma-separated `features` value.
fn first_feature(features: &str) -> Option<&str> {
    features.split(',').map(str::trim).find(|f| !f.is_empty())
}

/// Characters outside `[A-Za-z0-9._-]` become `_` in the attachment filename.
fn attachment_filename(feature: &str) -> String {
    let stem: String = feature
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.{}", stem, HttpConfig::APK_EXTENSION)
}

/// Resolve the requested feature and stream back its package bytes.
pub async fn handle_download(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DownloadParams>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let variant = require_param(&params.variant, "variant")?;
    let version = require_param(&params.version, "version")?;
    let application_id = require_param(&params.application_id, "application-id")?;
    let features = require_param(&params.features, "features")?;
    let feature = first_feature(features)
        .ok_or_else(|| ApiError::bad_request("Missing required parameter: features"))?;

    info!(
        "Download requested: feature={} variant={} version={} application-id={} signed={}",
        feature,
        variant,
        version,
        application_id,
        params.signature.is_some()
    );
    if !body.is_empty() {
        debug!("Device specification received ({} bytes)", body.len());
    }

    let artifact = state.resolver.resolve_artifact(feature).await.map_err(|e| {
        warn!("Download of '{}' failed: {}", feature, e);
        ApiError::from(e)
    })?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        attachment_filename(feature)
    ))
    .map_err(|e| ApiError::internal(format!("Invalid Content-Disposition: {}", e)))?;

    info!("Serving {} bytes for '{}'", artifact.len(), feature);
    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(HttpConfig::APK_CONTENT_TYPE),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact,
    ))
}

/// Acknowledge an uploaded bundle. Nothing is stored.
pub async fn handle_upload(
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    if body.is_empty() {
        return Err(ApiError::bad_request("Bundle body is empty"));
    }

    let variant = params.variant.unwrap_or_else(|| "unknown".to_string());
    let version = params.version.unwrap_or_else(|| "unknown".to_string());
    info!(
        "Bundle received: {} bytes, variant={} version={} application-id={}",
        body.len(),
        variant,
        version,
        params.application_id.as_deref().unwrap_or("unknown")
    );

    Ok(Json(UploadAck::received(body.len(), variant, version)))
}
