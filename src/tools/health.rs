//! Connectivity probe registered for every key kind.

use super::{Tool, ToolMetadata, ToolResult};
use crate::client::RestClient;
use crate::config::ApiKeyKind;
use crate::{tool_metadata, tool_result};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Verifies configuration and issues one lightweight authenticated read
/// against the surface the configured key unlocks. Diagnostics are the
/// tool's output, not an execution error.
pub struct HealthCheckTool {
    client: Arc<RestClient>,
    kind: ApiKeyKind,
}

impl HealthCheckTool {
    pub fn new(client: Arc<RestClient>, kind: ApiKeyKind) -> Self {
        Self { client, kind }
    }
}

#[async_trait]
impl Tool for HealthCheckTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "health_check",
            description: "Test MCP server and API connectivity.",
            parameters: []
        }
    }

    async fn execute(&self, _args: Value) -> Result<ToolResult> {
        if !self.client.is_configured() {
            return tool_result!(success: "Health check failed: API key or base URL not configured");
        }

        let probe = match self.kind {
            ApiKeyKind::AgentKey => self.client.get_agent_me().await.map(|_| ()),
            ApiKeyKind::UserKey => self.client.get_my_profile().await.map(|_| ()),
            ApiKeyKind::LegacyKey | ApiKeyKind::Unknown => {
                self.client.list_agents().await.map(|_| ())
            }
        };

        match probe {
            Ok(()) => tool_result!(success: format!(
                "MCP server operational\nBase URL: {}",
                self.client.base_url()
            )),
            Err(e) => tool_result!(success: format!("Health check failed: {}", e)),
        }
    }
}
