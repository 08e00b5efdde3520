//! Artifact resolution: feature id → registry → cache-or-fetch → bytes.
//!
//! Concurrent first requests for an uncached feature each fetch upstream and
//! each write the cache. Both writes carry the same source content, so the
//! last one winning is harmless, but callers must not assume one fetch.

use crate::cache::ArtifactCache;
use crate::error::ResolutionError;
use crate::network::ArtifactFetcher;
use crate::registry::ModuleRegistry;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Orchestrates registry lookup, cache and upstream fetch.
#[derive(Clone)]
pub struct ArtifactResolver {
    registry: Arc<ModuleRegistry>,
    cache: Arc<dyn ArtifactCache>,
    fetcher: Arc<dyn ArtifactFetcher>,
}

impl ArtifactResolver {
    pub fn new(
        registry: Arc<ModuleRegistry>,
        cache: Arc<dyn ArtifactCache>,
        fetcher: Arc<dyn ArtifactFetcher>,
    ) -> Self {
        Self {
            registry,
            cache,
            fetcher,
        }
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &dyn ArtifactCache {
        self.cache.as_ref()
    }

    /// Resolve a feature id to its artifact bytes.
    ///
    /// Only the miss path mutates state, and only after a complete fetch:
    /// a failed fetch leaves the cache untouched.
    pub async fn resolve_artifact(&self, feature_id: &str) -> Result<Bytes, ResolutionError> {
        let feature_id = feature_id.trim();
        if feature_id.is_empty() {
            return Err(ResolutionError::invalid_request("feature id is empty"));
        }

        let descriptor = self.registry.resolve(feature_id)?;

        if let Some(bytes) = self.cache.get(feature_id) {
            debug!("Cache hit for '{}' ({} bytes)", feature_id, bytes.len());
            return Ok(bytes);
        }

        info!(
            "Cache miss for '{}', fetching {}",
            feature_id, descriptor.source_url
        );
        let bytes = match self.fetcher.fetch(&descriptor.source_url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(
                    "Fetch failed for '{}' from {} ({}): {}",
                    feature_id,
                    descriptor.source_url,
                    e.kind(),
                    e
                );
                return Err(ResolutionError::UpstreamUnavailable {
                    feature: feature_id.to_string(),
                    source: e,
                });
            }
        };

        self.cache.put(feature_id, bytes.clone());
        Ok(bytes)
    }
}
