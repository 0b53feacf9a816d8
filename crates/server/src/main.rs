//! CleanSlate MCP server
//!
//! Serves the food-log tools over stdio. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use cleanslate_server::{Config, McpServer};
use cleanslate_tools::ToolRegistry;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let config = Config::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(config.log_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to install logger")?;

    let transport = config.transport_kind();
    info!(
        transport = ?transport,
        base_url = %config.base_url(),
        timeout_ms = config.timeout_ms,
        max_retries = config.max_retries,
        "CleanSlate MCP server starting"
    );

    let api = cleanslate_api::connect(transport, config.client_config()?)
        .context("Failed to build CleanSlate client")?;
    let server = McpServer::new(ToolRegistry::new(api));

    server.run().await.context("Server error")?;

    Ok(())
}
