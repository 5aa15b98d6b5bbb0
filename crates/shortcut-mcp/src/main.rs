//! Shortcut MCP server binary.
//!
//! This binary runs the MCP server using stdio transport.

use shortcut_api::{Config, ShortcutClient};
use shortcut_mcp::ShortcutMcpServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing. Logs go to stderr; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        host = %config.server_host,
        port = config.server_port,
        "Starting shortcut-mcp server"
    );

    let client = ShortcutClient::new(&config)?;
    let server = ShortcutMcpServer::new(client);
    server.run().await?;

    Ok(())
}
