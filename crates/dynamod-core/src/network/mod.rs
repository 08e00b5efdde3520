//! Upstream network access.
//!
//! This module provides:
//! - The `ArtifactFetcher` seam used by the resolver
//! - A reqwest-backed fetcher with bounded connect and read timeouts

mod fetcher;

pub use fetcher::{extract_domain, ArtifactFetcher, HttpFetcher};
