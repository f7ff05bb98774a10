//! Semver Router (v1)
//!
//! Serves static versioned routes, each guarded by a semver range.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request                ┌──────────────────────────────────────────────┐
//!     (accept-version: 1.0.1)       │                 SEMVER ROUTER                │
//!     ──────────────────────────────┼─▶ http server ─▶ version router ─▶ route     │
//!                                   │                    │                         │
//!                                   │                    ├─ Skip → next route, 404 │
//!                                   │                    └─ Fail → 400             │
//!                                   │                                              │
//!                                   │   config (TOML) ── ranges, header, routes    │
//!                                   │   observability ── tracing subscriber        │
//!                                   └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use semver_router::config::{load_config, RouterConfig};
use semver_router::http::{shutdown_signal, HttpServer};
use semver_router::observability::init_logging;

#[derive(Parser)]
#[command(name = "semver-router")]
#[command(about = "Serve routes guarded by semver ranges", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    if !init_logging(&config.observability.log_filter) {
        tracing::warn!("Tracing subscriber already installed; log_filter ignored");
    }

    tracing::info!("semver-router v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        header = config.versioning.header.as_deref().unwrap_or(semver_router::guard::DEFAULT_VERSION_HEADER),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
