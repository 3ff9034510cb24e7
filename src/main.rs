use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use thenvoi_mcp::cli::{Cli, Commands};
use thenvoi_mcp::client::RestClient;
use thenvoi_mcp::config::ApiKeyKind;
use thenvoi_mcp::{McpServer, Settings, ToolRegistry};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;
    init_tracing(&settings);

    let cli = Cli::parse();

    let client = Arc::new(RestClient::new(&settings.api_key, &settings.base_url));
    let kind = settings.key_kind();
    let registry = ToolRegistry::for_key_kind(kind, client);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let server = McpServer::new(registry, &settings.base_url);
            server.run().await
        }
        Commands::Tools => {
            handle_tools(&registry, kind);
            Ok(())
        }
    }
}

/// Logs go to stderr; stdout belongs to the MCP protocol.
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_tools(registry: &ToolRegistry, kind: ApiKeyKind) {
    use thenvoi_mcp::utils;

    utils::print_header("Available Tools");
    utils::print_info(&format!("API key kind: {:?}", kind));

    if kind == ApiKeyKind::Unknown {
        utils::print_error(
            "API key not recognized; expected a thnv_a_, thnv_u_, or thnv_ prefix. Only health_check is available.",
        );
    }

    println!("\n{}", registry.tools_description());
    utils::print_success(&format!("\n{} tools available", registry.tool_names().len()));
}
