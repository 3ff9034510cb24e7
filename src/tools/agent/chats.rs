//! Chat room management for the agent surface.

use crate::client::types::CreateChatRequest;
use crate::client::RestClient;
use crate::tools::{serialize_response, Tool, ToolMetadata, ToolResult};
use crate::{tool_metadata, tool_result, validate_required_string};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub struct ListAgentChatsTool {
    client: Arc<RestClient>,
}

impl ListAgentChatsTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListAgentChatsTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "listAgentChats",
            description: "List chat rooms where the agent is a participant.",
            parameters: [
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
        let page = args["page"].as_u64().map(|v| v as u32);
        let page_size = args["pageSize"].as_u64().map(|v| v as u32);

        tracing::debug!("Fetching agent's chat rooms");
        match self.client.list_agent_chats(page, page_size).await {
            Ok(result) => {
                tracing::info!("Retrieved {} chats", result.data.len());
                tool_result!(success: serialize_response(&result)?)
            }
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct GetAgentChatTool {
    client: Arc<RestClient>,
}

impl GetAgentChatTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetAgentChatTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "getAgentChat",
            description: "Get a specific chat room by ID.",
            parameters: [
                {
                    name: "chatId",
                    type: "string",
                    description: "The unique identifier of the chat room",
                    required: true
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "chatId");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let chat_id = validate_required_string!(args, "chatId");

        tracing::debug!("Fetching chat with ID: {}", chat_id);
        match self.client.get_agent_chat(chat_id).await {
            Ok(result) => {
                tracing::info!("Retrieved chat: {}", chat_id);
                tool_result!(success: serialize_response(&result)?)
            }
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

/// The authenticated agent becomes the owner of the room it creates.
pub struct CreateAgentChatTool {
    client: Arc<RestClient>,
}

impl CreateAgentChatTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CreateAgentChatTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "createAgentChat",
            description: "Create a new chat room with the agent as owner. Optionally associates the chat with a task.",
            parameters: [
                {
                    name: "taskId",
                    type: "string",
                    description: "Optional ID of an associated task",
                    required: false
                }
            ]
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        let request = CreateChatRequest {
            task_id: args["taskId"].as_str().map(String::from),
        };

        tracing::debug!("Creating new chat room");
        match self.client.create_agent_chat(&request).await {
            Ok(result) => match &result.data {
                Some(chat) => {
                    tracing::info!("Chat room created successfully: {}", chat.id);
                    tool_result!(success: serialize_response(&result)?)
                }
                None => {
                    tracing::error!("Chat room created but response data is None");
                    tool_result!(failure: "Chat room created but data not available in response")
                }
            },
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}
