//! Agent identity and peer discovery.

use crate::client::RestClient;
use crate::tools::{serialize_response, Tool, ToolMetadata, ToolResult};
use crate::{tool_metadata, tool_result};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Profile of the authenticated agent. Doubles as connection
/// validation: a successful call proves the API key works.
pub struct GetAgentMeTool {
    client: Arc<RestClient>,
}

impl GetAgentMeTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetAgentMeTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "getAgentMe",
            description: "Get the current agent's profile, including ID, name and description. Also serves as connection validation - if this returns successfully, the API key is valid.",
            parameters: []
        }
    }

    async fn execute(&self, _args: Value) -> Result<ToolResult> {
        tracing::debug!("Fetching agent profile");
        match self.client.get_agent_me().await {
            Ok(result) => {
                if let Some(profile) = &result.data {
                    tracing::info!("Retrieved agent profile: {}", profile.id);
                }
                tool_result!(success: serialize_response(&result)?)
            }
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

/// Peers are the agents the caller can recruit into chat rooms:
/// siblings with the same owner plus global agents, excluding self.
pub struct ListAgentPeersTool {
    client: Arc<RestClient>,
}

impl ListAgentPeersTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListAgentPeersTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "listAgentPeers",
            description: "List agents that can be recruited by the current agent. Includes sibling agents (same owner) and global agents; excludes self.",
            parameters: [
                {
                    name: "notInChat",
                    type: "string",
                    description: "Exclude agents already in this chat room ID",
                    required: false
                },
                {
                    name: "page",
                    type: "number",
                    description: "Page number for pagination",
                    required: false
                },
                {
                    name: "pageSize",
                    type: "number",
                    description: "Number of items per page",
                    required: false
                }
            ]
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        let not_in_chat = args["notInChat"].as_str();
        let page = args["page"].as_u64().map(|v| v as u32);
        let page_size = args["pageSize"].as_u64().map(|v| v as u32);

        tracing::debug!("Fetching agent peers");
        match self.client.list_agent_peers(not_in_chat, page, page_size).await {
            Ok(result) => {
                tracing::info!("Retrieved {} peers", result.data.len());
                tool_result!(success: serialize_response(&result)?)
            }
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}
