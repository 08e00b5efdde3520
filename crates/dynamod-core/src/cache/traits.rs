//! Cache backend trait.

use bytes::Bytes;

/// Feature id → artifact bytes store.
///
/// Implementations own their synchronization; callers never lock.
pub trait ArtifactCache: Send + Sync {
    /// Look up cached bytes. Never blocks on I/O.
    fn get(&self, key: &str) -> Option<Bytes>;

    /// Insert or overwrite. Last writer wins.
    fn put(&self, key: &str, value: Bytes);

    /// Number of cached entries.
    fn size(&self) -> usize;

    /// Remove every entry, returning how many were removed.
    ///
    /// A `put` that started before the clear may still land after it.
    fn clear(&self) -> usize;
}
