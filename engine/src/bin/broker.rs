//! sb-brokerd: the elevated-tier broker daemon
//!
//! Speaks the one-line-per-message protocol over its own stdin/stdout and
//! logs to stderr (stdout belongs to the protocol). Exits 0 after
//! answering ShutdownServer or when the issuing side closes the stream;
//! any startup fault is logged and exits non-zero.

use anyhow::Result;
use sb_engine::domain::dispatcher::{CommandDispatcher, PrivilegeTier};
use sb_engine::infrastructure::{self, BridgeConfig};
use sb_engine::server::StreamServer;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        error!(error = %err, "sb-brokerd failed");
        return Err(err);
    }
    Ok(())
}

async fn run() -> Result<()> {
    info!(
        "sb-brokerd starting (version {})",
        env!("CARGO_PKG_VERSION")
    );

    let config = BridgeConfig::load()?;
    let deps = infrastructure::build_deps(config.backend);
    let dispatcher = Arc::new(CommandDispatcher::for_tier(PrivilegeTier::Elevated, deps));

    let server = StreamServer::new(dispatcher);
    server
        .serve(tokio::io::stdin(), tokio::io::stdout())
        .await?;

    info!("sb-brokerd shutting down");
    Ok(())
}
