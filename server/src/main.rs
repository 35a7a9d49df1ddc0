//! SNS mock server entry point

use anyhow::Context;
use clap::Parser;
use sns_mock_server::{cli::Cli, logging, server, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init()?;

    let config = cli
        .resolve_config()
        .context("failed to load configuration")?;
    info!(
        region = %config.region,
        account_id = %config.account_id,
        "Starting SNS mock server"
    );

    let bind_addr = config.bind_addr();
    let state = AppState::new(&config);
    server::run(state, &bind_addr)
        .await
        .with_context(|| format!("server error on {}", bind_addr))?;

    Ok(())
}
