//! dynamod server - HTTP broker for dynamic feature modules.
//!
//! Serves the module metadata feed and module package downloads, fetching
//! packages from the upstream static host on first request and keeping them
//! in memory afterwards.

mod error;
mod handlers;
mod server;

use anyhow::{Context, Result};
use clap::Parser;
use dynamod_core::config::{HttpConfig, NetworkConfig};
use dynamod_core::{ArtifactResolver, FetchConfig, HttpFetcher, MemoryArtifactCache, ModuleRegistry};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "dynamod-server")]
#[command(about = "Dynamic feature module server")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, env = "PORT", default_value_t = HttpConfig::DEFAULT_PORT)]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = HttpConfig::DEFAULT_HOST)]
    host: String,

    /// Registry JSON file (metadata feed format). Uses the builtin table if omitted.
    #[arg(long, env = "DYNAMOD_REGISTRY")]
    registry: Option<PathBuf>,

    /// Upstream connect timeout in seconds
    #[arg(long, default_value_t = NetworkConfig::CONNECT_TIMEOUT.as_secs())]
    connect_timeout_secs: u64,

    /// Upstream read timeout in seconds
    #[arg(long, default_value_t = NetworkConfig::READ_TIMEOUT.as_secs())]
    read_timeout_secs: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging; RUST_LOG overrides the flag
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Starting dynamod server");

    let registry = match &args.registry {
        Some(path) => ModuleRegistry::from_file(path)
            .with_context(|| format!("loading registry from {}", path.display()))?,
        None => ModuleRegistry::builtin(),
    };
    info!("Registry ready with {} module(s)", registry.len());

    let fetch_config = FetchConfig::default()
        .with_connect_timeout(Duration::from_secs(args.connect_timeout_secs))
        .with_read_timeout(Duration::from_secs(args.read_timeout_secs));
    let fetcher = HttpFetcher::with_config(fetch_config)?;

    let resolver = ArtifactResolver::new(
        Arc::new(registry),
        Arc::new(MemoryArtifactCache::new()),
        Arc::new(fetcher),
    );
    let state = Arc::new(server::AppState::new(resolver));

    let addr = server::start_server(state, &args.host, args.port).await?;

    // Intentional stdout so launchers and tests can discover an auto-assigned port
    println!("SERVER_PORT={}", addr.port());

    info!("Server running on {}", addr);

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting");

    Ok(())
}
