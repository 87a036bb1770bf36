// quotad - Main Entry Point
//
// Per-key fixed-window quota admission service:
// - one immutable policy for all keys
// - lazy per-key buckets with lazy window rollover
// - HTTP surface: GET /health, POST /quota/consume

use anyhow::Result;
use clap::Parser;
use quotad::config::ServiceConfig;
use quotad::quota::{QuotaEngine, QuotaPolicy};
use quotad::server;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// quotad: per-key fixed-window quota admission control
#[derive(Parser, Debug)]
#[command(name = "quotad")]
#[command(version = "0.1.0")]
#[command(about = "Per-key fixed-window quota admission service", long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// HTTP listen port
    #[arg(long)]
    port: Option<u16>,

    /// Units each key may consume per window
    #[arg(long)]
    limit: Option<u64>,

    /// Window length in milliseconds
    #[arg(long)]
    window_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(filter.into())
                .from_env_lossy(),
        )
        .init();

    // Environment first, CLI flags on top
    let mut config = ServiceConfig::from_env();
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(limit) = args.limit {
        config.limit_units = limit;
    }
    if let Some(window_ms) = args.window_ms {
        config.window_ms = window_ms;
    }

    // Fail fast on a malformed policy
    let policy = QuotaPolicy::new(config.limit_units, config.window_ms)?;

    info!(
        port = config.port,
        limit = policy.limit_units(),
        window_ms = policy.window_ms(),
        "quotad v0.1.0 starting..."
    );

    let engine = Arc::new(QuotaEngine::new(policy));

    server::serve(engine, config.port).await
}
