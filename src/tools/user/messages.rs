//! Message listing and sending for the user surface.
//!
//! Sending resolves recipient names the same way the agent surface
//! does, but recipients are optional: a message without them is a
//! broadcast carrying no mentions.

use crate::client::types::ChatMessageRequest;
use crate::client::RestClient;
use crate::core::mentions::{plan_mentions, MentionPlan, MentionPolicy, NameIndex};
use crate::tools::{serialize_response, Tool, ToolMetadata, ToolResult};
use crate::{tool_metadata, tool_result, validate_required_string};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub struct ListUserChatMessagesTool {
    client: Arc<RestClient>,
}

impl ListUserChatMessagesTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListUserChatMessagesTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "list_user_chat_messages",
            description: "List messages in a chat room, optionally filtered by type or timestamp.",
            parameters: [
                {
                    name: "chat_id",
                    type: "string",
                    description: "The chat room ID",
                    required: true
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
                },
                {
                    name: "message_type",
                    type: "string",
                    description: "Filter by type: 'text', 'tool_call', etc.",
                    required: false
                },
                {
                    name: "since",
                    type: "string",
                    description: "ISO 8601 timestamp to filter messages after",
                    required: false
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "chat_id");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let chat_id = validate_required_string!(args, "chat_id");
        let page = args["page"].as_u64().map(|v| v as u32);
        let page_size = args["page_size"].as_u64().map(|v| v as u32);
        let message_type = args["message_type"].as_str();
        // The upstream API rejects the `Z` UTC suffix; rewrite it to an
        // explicit offset.
        let since = args["since"].as_str().map(|s| s.replace('Z', "+00:00"));

        match self
            .client
            .list_my_chat_messages(chat_id, page, page_size, message_type, since.as_deref())
            .await
        {
            Ok(result) => tool_result!(success: serialize_response(&result)?),
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct SendUserChatMessageTool {
    client: Arc<RestClient>,
}

impl SendUserChatMessageTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SendUserChatMessageTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "send_user_chat_message",
            description: "Send a message in a chat room. Name recipients to @mention them, or omit recipients to broadcast without mentions.",
            parameters: [
                {
                    name: "chat_id",
                    type: "string",
                    description: "The chat room ID",
                    required: true
                },
                {
                    name: "content",
                    type: "string",
                    description: "Message text",
                    required: true
                },
                {
                    name: "recipients",
                    type: "string",
                    description: "Comma-separated participant names to @mention",
                    required: false
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "chat_id");
        validate_required_string!(args, "content");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let chat_id = validate_required_string!(args, "chat_id");
        let content = validate_required_string!(args, "content");
        let recipients = args["recipients"].as_str();

        let mentions = match plan_mentions(chat_id, recipients, None, MentionPolicy::Optional)? {
            MentionPlan::Ready(mentions) => mentions,
            MentionPlan::Lookup(names) => {
                let participants = self.client.list_my_chat_participants(chat_id, None).await?;
                NameIndex::build(&participants.data)
                    .resolve_all(&names, MentionPolicy::Optional)?
            }
        };

        let request = ChatMessageRequest::text(content, mentions);
        match self.client.create_my_chat_message(chat_id, &request).await {
            Ok(result) => tool_result!(success: serialize_response(&result)?),
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}
