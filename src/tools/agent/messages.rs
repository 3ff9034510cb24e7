//! Conversation context retrieval and text message sending.

use crate::client::types::ChatMessageRequest;
use crate::client::RestClient;
use crate::core::mentions::{plan_mentions, MentionPlan, MentionPolicy, NameIndex};
use crate::tools::{serialize_response, Tool, ToolMetadata, ToolResult};
use crate::{tool_metadata, tool_result, validate_required_string};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Everything the agent needs to resume execution: all messages it
/// sent plus all text messages that mention it, oldest first.
pub struct GetAgentChatContextTool {
    client: Arc<RestClient>,
}

impl GetAgentChatContextTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetAgentChatContextTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "getAgentChatContext",
            description: "Get conversation context for agent rehydration: all messages the agent sent plus all text messages that @mention it, in chronological order (oldest first).",
            parameters: [
                {
                    name: "chatId",
                    type: "string",
                    description: "The unique identifier of the chat room",
                    required: true
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
                    description: "Items per page",
                    required: false
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
        let page = args["page"].as_u64().map(|v| v as u32);
        let page_size = args["pageSize"].as_u64().map(|v| v as u32);

        tracing::debug!("Fetching agent context for chat: {}", chat_id);
        match self
            .client
            .get_agent_chat_context(chat_id, page, page_size)
            .await
        {
            Ok(result) => {
                tracing::info!(
                    "Retrieved {} context messages for chat: {}",
                    result.data.len(),
                    chat_id
                );
                tool_result!(success: serialize_response(&result)?)
            }
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

/// Sends a text message. Messages must tag at least one recipient so
/// the platform can route them; callers either name recipients and let
/// the tool resolve them against the chat's participants, or supply
/// pre-resolved mentions and skip the lookup entirely.
pub struct CreateAgentChatMessageTool {
    client: Arc<RestClient>,
}

impl CreateAgentChatMessageTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CreateAgentChatMessageTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "createAgentChatMessage",
            description: "Send a text message in a chat room. Specify recipients as comma-separated names (resolved to IDs automatically) or pass pre-resolved mentions; mentions take precedence when both are given. For event-type messages use createAgentChatEvent instead.",
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
                    description: "The message content/text",
                    required: true
                },
                {
                    name: "recipients",
                    type: "string",
                    description: "Comma-separated participant names to tag, e.g. \"weather agent,sarah\"",
                    required: false
                },
                {
                    name: "mentions",
                    type: "string",
                    description: "JSON array of pre-resolved mentions: [{\"id\": \"uuid\", \"name\": \"display_name\"}, ...]",
                    required: false
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "chatId");
        validate_required_string!(args, "content");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let chat_id = validate_required_string!(args, "chatId");
        let content = validate_required_string!(args, "content");
        let recipients = args["recipients"].as_str();
        let mentions_raw = args["mentions"].as_str();

        tracing::debug!("Creating message in chat: {}", chat_id);

        let mentions = match plan_mentions(chat_id, recipients, mentions_raw, MentionPolicy::Required)? {
            MentionPlan::Ready(mentions) => mentions,
            MentionPlan::Lookup(names) => {
                let participants = self.client.list_agent_chat_participants(chat_id).await?;
                NameIndex::build(&participants.data)
                    .resolve_all(&names, MentionPolicy::Required)?
            }
        };

        let request = ChatMessageRequest::text(content, mentions);
        match self.client.create_agent_chat_message(chat_id, &request).await {
            Ok(result) => match &result.data {
                Some(message) => {
                    tracing::info!("Message sent successfully: {}", message.id);
                    tool_result!(success: serialize_response(&result)?)
                }
                None => {
                    tool_result!(failure: "Message created but data not available in response")
                }
            },
            Err(e) => {
                tracing::error!("Failed to send message: {}", e);
                tool_result!(failure: format!("Failed to send message: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn participants_body() -> Value {
        json!({
            "data": [
                {"id": "a2", "participant_type": "agent", "agent_name": "Weather Agent"},
                {"id": "u1", "participant_type": "user", "first_name": "Sarah", "last_name": "Connor"}
            ]
        })
    }

    #[tokio::test]
    async fn test_recipients_are_resolved_case_insensitively() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/agent/chats/c1/participants"))
            .respond_with(ResponseTemplate::new(200).set_body_json(participants_body()))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/v1/agent/chats/c1/messages"))
            .and(body_json(json!({
                "content": "Hello!",
                "mentions": [{"id": "a2", "name": "Weather Agent"}]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"id": "m1", "content": "Hello!"}
            })))
            .mount(&mock_server)
            .await;

        let tool = CreateAgentChatMessageTool::new(Arc::new(RestClient::new(
            "thnv_a_k",
            mock_server.uri(),
        )));
        let result = tool
            .execute(json!({
                "chatId": "c1",
                "content": "Hello!",
                "recipients": "WEATHER AGENT"
            }))
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.output.contains("\"id\": \"m1\""));
    }

    #[tokio::test]
    async fn test_pre_resolved_mentions_skip_participant_fetch() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/agent/chats/c1/participants"))
            .respond_with(ResponseTemplate::new(200).set_body_json(participants_body()))
            .expect(0)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/v1/agent/chats/c1/messages"))
            .and(body_json(json!({
                "content": "Hello!",
                "mentions": [{"id": "u9", "name": "Zed"}]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"id": "m2"}
            })))
            .mount(&mock_server)
            .await;

        let tool = CreateAgentChatMessageTool::new(Arc::new(RestClient::new(
            "thnv_a_k",
            mock_server.uri(),
        )));
        let result = tool
            .execute(json!({
                "chatId": "c1",
                "content": "Hello!",
                "mentions": "[{\"id\":\"u9\",\"name\":\"Zed\"}]"
            }))
            .await
            .unwrap();

        assert!(result.success);
    }

    #[tokio::test]
    async fn test_unmatched_recipient_sends_nothing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/agent/chats/c1/participants"))
            .respond_with(ResponseTemplate::new(200).set_body_json(participants_body()))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/v1/agent/chats/c1/messages"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&mock_server)
            .await;

        let tool = CreateAgentChatMessageTool::new(Arc::new(RestClient::new(
            "thnv_a_k",
            mock_server.uri(),
        )));
        let err = tool
            .execute(json!({
                "chatId": "c1",
                "content": "Hello!",
                "recipients": "Sarah,Carol"
            }))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Could not find participants: Carol"));
        assert!(message.contains("Available participants:"));
    }

    #[tokio::test]
    async fn test_missing_recipients_and_mentions_names_remediation() {
        let tool = CreateAgentChatMessageTool::new(Arc::new(RestClient::new(
            "thnv_a_k",
            "http://localhost:1",
        )));
        let err = tool
            .execute(json!({"chatId": "c9", "content": "Hello!"}))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Missing recipients or mentions."));
        assert!(message.contains("listAgentChatParticipants(chatId='c9')"));
    }

    #[tokio::test]
    async fn test_send_failure_is_wrapped() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/agent/chats/c1/messages"))
            .respond_with(ResponseTemplate::new(422).set_body_string("mentions required"))
            .mount(&mock_server)
            .await;

        let tool = CreateAgentChatMessageTool::new(Arc::new(RestClient::new(
            "thnv_a_k",
            mock_server.uri(),
        )));
        let result = tool
            .execute(json!({
                "chatId": "c1",
                "content": "Hello!",
                "mentions": "[]"
            }))
            .await
            .unwrap();

        assert!(!result.success);
        let error = result.error.unwrap();
        assert!(error.starts_with("Failed to send message:"));
        assert!(error.contains("mentions required"));
    }
}
