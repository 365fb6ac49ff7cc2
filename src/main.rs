//! flowline-iq - Shaker Performance Reporting Service
//!
//! Loads a flowline shaker performance dataset (CSV) and serves the
//! filtering, summary, and cost-comparison API behind the dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Serve the default dataset on the default address
//! cargo run --release
//!
//! # Explicit dataset and bind address
//! ./flowline-iq --csv data/refine_sample.csv --addr 0.0.0.0:9000
//! ```
//!
//! # Environment Variables
//!
//! - `FLOWLINE_CONFIG`: Path to the service TOML config
//! - `FLOWLINE_CORS_ORIGINS`: Comma-separated dev CORS origins
//! - `RUST_LOG`: Logging level (default: info)

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use flowline_iq::api::{create_app, DashboardState};
use flowline_iq::config::AppConfig;
use flowline_iq::dataset::Dataset;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "flowline-iq")]
#[command(about = "Flowline shaker performance reporting service")]
#[command(version)]
struct CliArgs {
    /// Path to the performance CSV (overrides the config file)
    #[arg(long)]
    csv: Option<String>,

    /// Override the server address (default: "0.0.0.0:8080")
    #[arg(short, long)]
    addr: Option<String>,

    /// Path to the service config TOML (overrides the search order)
    #[arg(long)]
    config: Option<String>,
}

// ============================================================================
// Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load_from_file(std::path::Path::new(path))
            .with_context(|| format!("Failed to load config from {path}"))?,
        None => AppConfig::load(),
    };
    if let Some(csv) = args.csv {
        config.dataset.path = csv;
    }
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }
    info!("✓ Configuration loaded");

    let dataset = Dataset::load(&config.dataset.path)
        .with_context(|| format!("Failed to load dataset from {}", config.dataset.path))?;
    info!(
        records = dataset.info.record_count,
        "✓ Dataset loaded from {}", config.dataset.path
    );

    let state = DashboardState {
        dataset: Arc::new(dataset),
        cost_defaults: config.cost_defaults.clone(),
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.server.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.addr))?;
    info!("✓ Dashboard API listening on http://{}", config.server.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install ctrl-c handler");
        return;
    }
    info!("Shutdown signal received");
}
