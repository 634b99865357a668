//! mcp-jokebook server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use jokebook_client::{CategoryResolver, JokeApiClient, JokeApiConfig};
use jokebook_core::{AppConfig, JokeDb};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;

    tracing::info!("Starting mcp-jokebook server on stdio transport");

    let db = JokeDb::open(&config.db_path).await?;

    let provider = JokeApiClient::new(JokeApiConfig {
        base_url: config.provider_base_url.clone(),
        timeout: config.timeout(),
        user_agent: config.user_agent.clone(),
    })?;

    let resolver = CategoryResolver::new(db.clone(), provider).with_import_amount(config.import_amount);

    let handler = handler::JokebookServer::new(db, resolver);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
