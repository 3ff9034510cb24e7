//! Thenvoi MCP - MCP server for the Thenvoi agent collaboration platform
//!
//! Exposes the platform's REST API as MCP tools over a stdio transport.
//! The configured API key's prefix decides which tool group is served:
//! agent keys unlock the agent-centric tools, user keys the user-scoped
//! tools, and legacy platform keys the administration tools.

pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod server;
pub mod tools;
pub mod utils;

pub use config::Settings;
pub use server::McpServer;
pub use tools::registry::ToolRegistry;
