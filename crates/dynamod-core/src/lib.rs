//! dynamod core - module registry, artifact fetching and caching for dynamic
//! feature delivery.
//!
//! This crate resolves a feature id to the bytes of its module package. It has
//! no HTTP server dependency; `dynamod-server` puts it behind axum.
//!
//! # Example
//!
//! ```rust,ignore
//! use dynamod_core::{ArtifactResolver, HttpFetcher, MemoryArtifactCache, ModuleRegistry};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> dynamod_core::Result<()> {
//!     let resolver = ArtifactResolver::new(
//!         Arc::new(ModuleRegistry::builtin()),
//!         Arc::new(MemoryArtifactCache::new()),
//!         Arc::new(HttpFetcher::new()?),
//!     );
//!
//!     let apk = resolver.resolve_artifact("extension_pagos_servicios").await;
//!     println!("{:?}", apk.map(|b| b.len()));
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod registry;
pub mod resolver;

pub use cache::{ArtifactCache, MemoryArtifactCache};
pub use config::FetchConfig;
pub use error::{DynamodError, FetchError, RegistryError, ResolutionError, Result};
pub use models::ModuleDescriptor;
pub use network::{ArtifactFetcher, HttpFetcher};
pub use registry::ModuleRegistry;
pub use resolver::ArtifactResolver;
