use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "thenvoi-mcp")]
#[command(author, version, about = "MCP server for the Thenvoi agent collaboration platform", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve MCP over stdin/stdout (the default when no subcommand is given)
    Serve,

    /// List the tools the configured API key unlocks
    Tools,
}
