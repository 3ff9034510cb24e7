//! Profile access and peer discovery for the user surface.

use crate::client::types::UpdateProfileRequest;
use crate::client::RestClient;
use crate::tools::{serialize_response, Tool, ToolMetadata, ToolResult};
use crate::{tool_metadata, tool_result};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub struct GetUserProfileTool {
    client: Arc<RestClient>,
}

impl GetUserProfileTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetUserProfileTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "get_user_profile",
            description: "Get the current user's profile details: name, email, role, etc.",
            parameters: []
        }
    }

    async fn execute(&self, _args: Value) -> Result<ToolResult> {
        match self.client.get_my_profile().await {
            Ok(result) => tool_result!(success: serialize_response(&result)?),
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

/// Updates only the fields actually provided; sending null would clear
/// them upstream.
pub struct UpdateUserProfileTool {
    client: Arc<RestClient>,
}

impl UpdateUserProfileTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for UpdateUserProfileTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "update_user_profile",
            description: "Update the current user's profile. At least one field must be provided.",
            parameters: [
                {
                    name: "first_name",
                    type: "string",
                    description: "New first name",
                    required: false
                },
                {
                    name: "last_name",
                    type: "string",
                    description: "New last name",
                    required: false
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        if args["first_name"].as_str().is_none() && args["last_name"].as_str().is_none() {
            return Err(anyhow!(
                "At least one field (first_name or last_name) must be provided"
            ));
        }
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let request = UpdateProfileRequest {
            first_name: args["first_name"].as_str().map(String::from),
            last_name: args["last_name"].as_str().map(String::from),
        };

        match self.client.update_my_profile(&request).await {
            Ok(result) => tool_result!(success: serialize_response(&result)?),
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct ListUserPeersTool {
    client: Arc<RestClient>,
}

impl ListUserPeersTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListUserPeersTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "list_user_peers",
            description: "List entities you can interact with in chat rooms: other users, your agents, and global agents.",
            parameters: [
                {
                    name: "not_in_chat",
                    type: "string",
                    description: "Exclude entities already in this chat room",
                    required: false
                },
                {
                    name: "peer_type",
                    type: "string",
                    description: "Filter by type: 'User' or 'Agent'",
                    required: false
                },
                {
                    name: "page",
                    type: "number",
                    description: "Page number",
                    required: false
                },
                {
                    name: "page_size",
                    type: "number",
                    description: "Items per page",
                    required: false
                }
            ]
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        let not_in_chat = args["not_in_chat"].as_str();
        let peer_type = args["peer_type"].as_str();
        let page = args["page"].as_u64().map(|v| v as u32);
        let page_size = args["page_size"].as_u64().map(|v| v as u32);

        match self
            .client
            .list_my_peers(not_in_chat, peer_type, page, page_size)
            .await
        {
            Ok(result) => tool_result!(success: serialize_response(&result)?),
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}
