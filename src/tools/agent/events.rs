//! Event emission: typed progress signals that carry no mentions.

use crate::client::types::ChatEventRequest;
use crate::client::RestClient;
use crate::tools::{serialize_response, Tool, ToolMetadata, ToolResult};
use crate::{tool_metadata, tool_result, validate_required_string};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Event types the platform accepts, kept sorted for error messages.
const VALID_EVENT_TYPES: [&str; 5] = ["error", "task", "thought", "tool_call", "tool_result"];

pub struct CreateAgentChatEventTool {
    client: Arc<RestClient>,
}

impl CreateAgentChatEventTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CreateAgentChatEventTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "createAgentChatEvent",
            description: "Create an event in a chat room to report progress: a tool call, a tool result, a thought, an error, or a task update. Events are not text messages and tag no recipients.",
            parameters: [
                {
                    name: "chatId",
                    type: "string",
                    description: "The unique identifier of the chat room",
                    required: true
                },
                {
                    name: "content",
                    type: "string",
                    description: "The event content/text",
                    required: true
                },
                {
                    name: "messageType",
                    type: "string",
                    description: "Event type: tool_call, tool_result, thought, error, or task",
                    required: true
                },
                {
                    name: "metadata",
                    type: "string",
                    description: "Optional JSON object with event metadata, e.g. '{\"tool\": \"search\"}'",
                    required: false
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "chatId");
        validate_required_string!(args, "content");
        let message_type = validate_required_string!(args, "messageType");
        if !VALID_EVENT_TYPES.contains(&message_type.to_lowercase().as_str()) {
            return Err(anyhow!(
                "Invalid messageType: {}. Must be one of: {}",
                message_type,
                VALID_EVENT_TYPES.join(", ")
            ));
        }
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let chat_id = validate_required_string!(args, "chatId");
        let content = validate_required_string!(args, "content");
        let message_type = validate_required_string!(args, "messageType").to_lowercase();

        let metadata = match args["metadata"].as_str() {
            Some(raw) => Some(
                serde_json::from_str::<Value>(raw)
                    .map_err(|e| anyhow!("Invalid JSON for metadata: {}", e))?,
            ),
            None => None,
        };

        tracing::debug!("Creating event in chat: {}, type: {}", chat_id, message_type);

        let request = ChatEventRequest {
            content: content.to_string(),
            message_type,
            metadata,
        };
        match self.client.create_agent_chat_event(chat_id, &request).await {
            Ok(result) => match &result.data {
                Some(event) => {
                    tracing::info!("Event created successfully: {}", event.id);
                    tool_result!(success: serialize_response(&result)?)
                }
                None => {
                    tool_result!(failure: "Event created but data not available in response")
                }
            },
            Err(e) => {
                tracing::error!("Failed to create event: {}", e);
                tool_result!(failure: format!("Failed to create event: {}", e))
            }
        }
    }
}
