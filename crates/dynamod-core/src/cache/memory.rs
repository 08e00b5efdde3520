//! In-memory cache backend.

use super::ArtifactCache;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// `RwLock<HashMap>` backed artifact cache.
///
/// Values are `Bytes` handles replaced whole under the write lock, so a reader
/// sees either the previous entry or the complete new payload.
#[derive(Debug, Default)]
pub struct MemoryArtifactCache {
    entries: RwLock<HashMap<String, Bytes>>,
}

impl MemoryArtifactCache {
    pub fn new() -> Self {
        Self::default()
    }
}

// A panicking writer cannot leave the map half-updated, so poisoned locks
// are recovered instead of propagated.
impl ArtifactCache for MemoryArtifactCache {
    fn get(&self, key: &str) -> Option<Bytes> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn put(&self, key: &str, value: Bytes) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        debug!("Caching {} bytes for '{}'", value.len(), key);
        entries.insert(key.to_string(), value);
    }

    fn size(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }

    fn clear(&self) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let removed = entries.len();
        entries.clear();
        removed
    }
}
