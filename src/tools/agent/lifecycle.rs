//! Message processing lifecycle: processing, processed, failed.
//!
//! Each transition creates or completes a processing attempt with
//! system-managed timestamps; processed and failed require an active
//! attempt and return a 422 otherwise.

use crate::client::RestClient;
use crate::tools::{serialize_response, Tool, ToolMetadata, ToolResult};
use crate::{tool_metadata, tool_result, validate_required_string};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub struct MarkAgentMessageProcessingTool {
    client: Arc<RestClient>,
}

impl MarkAgentMessageProcessingTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for MarkAgentMessageProcessingTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "markAgentMessageProcessing",
            description: "Mark a message as being processed by the agent. Creates a new processing attempt with an auto-incremented attempt number and a system-managed started_at timestamp.",
            parameters: [
                {
                    name: "chatId",
                    type: "string",
                    description: "The unique identifier of the chat room",
                    required: true
                },
                {
                    name: "messageId",
                    type: "string",
                    description: "The ID of the message to mark as processing",
                    required: true
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "chatId");
        validate_required_string!(args, "messageId");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let chat_id = validate_required_string!(args, "chatId");
        let message_id = validate_required_string!(args, "messageId");

        tracing::debug!("Marking message {} as processing in chat {}", message_id, chat_id);
        match self
            .client
            .mark_agent_message_processing(chat_id, message_id)
            .await
        {
            Ok(result) => {
                tracing::info!("Message marked as processing: {}", message_id);
                tool_result!(success: serialize_response(&result)?)
            }
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct MarkAgentMessageProcessedTool {
    client: Arc<RestClient>,
}

impl MarkAgentMessageProcessedTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for MarkAgentMessageProcessedTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "markAgentMessageProcessed",
            description: "Mark a message as successfully processed. Completes the current processing attempt; requires an active attempt (call markAgentMessageProcessing first).",
            parameters: [
                {
                    name: "chatId",
                    type: "string",
                    description: "The unique identifier of the chat room",
                    required: true
                },
                {
                    name: "messageId",
                    type: "string",
                    description: "The ID of the message to mark as processed",
                    required: true
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "chatId");
        validate_required_string!(args, "messageId");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let chat_id = validate_required_string!(args, "chatId");
        let message_id = validate_required_string!(args, "messageId");

        tracing::debug!("Marking message {} as processed in chat {}", message_id, chat_id);
        match self
            .client
            .mark_agent_message_processed(chat_id, message_id)
            .await
        {
            Ok(result) => {
                tracing::info!("Message marked as processed: {}", message_id);
                tool_result!(success: serialize_response(&result)?)
            }
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct MarkAgentMessageFailedTool {
    client: Arc<RestClient>,
}

impl MarkAgentMessageFailedTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for MarkAgentMessageFailedTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "markAgentMessageFailed",
            description: "Mark a message processing attempt as failed, recording the error. Requires an active attempt (call markAgentMessageProcessing first).",
            parameters: [
                {
                    name: "chatId",
                    type: "string",
                    description: "The unique identifier of the chat room",
                    required: true
                },
                {
                    name: "messageId",
                    type: "string",
                    description: "The ID of the message to mark as failed",
                    required: true
                },
                {
                    name: "error",
                    type: "string",
                    description: "Error message describing why processing failed",
                    required: true
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "chatId");
        validate_required_string!(args, "messageId");
        validate_required_string!(args, "error");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let chat_id = validate_required_string!(args, "chatId");
        let message_id = validate_required_string!(args, "messageId");
        let error = validate_required_string!(args, "error");

        tracing::debug!(
            "Marking message {} as failed in chat {}: {}",
            message_id,
            chat_id,
            error
        );
        match self
            .client
            .mark_agent_message_failed(chat_id, message_id, error)
            .await
        {
            Ok(result) => {
                tracing::info!("Message marked as failed: {}", message_id);
                tool_result!(success: serialize_response(&result)?)
            }
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_mark_processing_posts_without_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/agent/chats/c1/messages/m1/processing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"id": "m1", "message_type": "text"}
            })))
            .mount(&mock_server)
            .await;

        let tool = MarkAgentMessageProcessingTool::new(Arc::new(RestClient::new(
            "thnv_a_k",
            mock_server.uri(),
        )));
        let result = tool
            .execute(json!({"chatId": "c1", "messageId": "m1"}))
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.output.contains("\"id\": \"m1\""));
    }

    #[tokio::test]
    async fn test_mark_failed_requires_error_and_sends_it() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/agent/chats/c1/messages/m1/failed"))
            .and(body_json(json!({"error": "tool crashed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"id": "m1"}
            })))
            .mount(&mock_server)
            .await;

        let tool = MarkAgentMessageFailedTool::new(Arc::new(RestClient::new(
            "thnv_a_k",
            mock_server.uri(),
        )));

        let err = tool
            .execute(json!({"chatId": "c1", "messageId": "m1"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("'error'"));

        let result = tool
            .execute(json!({"chatId": "c1", "messageId": "m1", "error": "tool crashed"}))
            .await
            .unwrap();
        assert!(result.success);
    }

    #[tokio::test]
    async fn test_mark_processed_surfaces_missing_attempt_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/agent/chats/c1/messages/m1/processed"))
            .respond_with(
                ResponseTemplate::new(422).set_body_string("no active processing attempt"),
            )
            .mount(&mock_server)
            .await;

        let tool = MarkAgentMessageProcessedTool::new(Arc::new(RestClient::new(
            "thnv_a_k",
            mock_server.uri(),
        )));
        let result = tool
            .execute(json!({"chatId": "c1", "messageId": "m1"}))
            .await
            .unwrap();

        assert!(!result.success);
        assert!(result.error.unwrap().contains("no active processing attempt"));
    }
}
