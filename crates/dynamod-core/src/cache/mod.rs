//! Artifact cache: fetched module packages kept in process memory.
//!
//! Entries live until an explicit clear. There is no TTL and no link to
//! `ModuleDescriptor::version`, so a changed upstream artifact keeps being
//! served from here until the cache is cleared.

mod memory;
mod traits;

pub use memory::MemoryArtifactCache;
pub use traits::ArtifactCache;
