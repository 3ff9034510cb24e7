//! Chat room membership management for the agent-centric surface.

use crate::client::types::AddParticipantRequest;
use crate::client::RestClient;
use crate::tools::{serialize_response, Tool, ToolMetadata, ToolResult};
use crate::{tool_metadata, tool_result, validate_optional_string, validate_required_string};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Roles the platform accepts for a chat participant, kept sorted for
/// error messages.
const VALID_ROLES: [&str; 3] = ["admin", "member", "owner"];

pub struct ListAgentChatParticipantsTool {
    client: Arc<RestClient>,
}

impl ListAgentChatParticipantsTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListAgentChatParticipantsTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "list_agent_chat_participants",
            description: "List all participants (users and agents) in a chat room where the agent is a member.",
            parameters: [
                {
                    name: "chat_id",
                    type: "string",
                    description: "The unique identifier of the chat room",
                    required: true
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

        tracing::debug!("Fetching participants for chat: {}", chat_id);
        match self.client.list_agent_chat_participants(chat_id).await {
            Ok(result) => {
                tracing::info!(
                    "Retrieved {} participants for chat: {}",
                    result.data.len(),
                    chat_id
                );
                tool_result!(success: serialize_response(&result)?)
            }
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

/// The acting agent must be the owner or admin of the room; it can add
/// sibling agents, global agents, or its owner.
pub struct AddAgentChatParticipantTool {
    client: Arc<RestClient>,
}

impl AddAgentChatParticipantTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for AddAgentChatParticipantTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "add_agent_chat_participant",
            description: "Add a participant (agent or user) to a chat room. Use list_agent_peers(not_in_chat=chat_id) to discover available participants.",
            parameters: [
                {
                    name: "chat_id",
                    type: "string",
                    description: "The unique identifier of the chat room",
                    required: true
                },
                {
                    name: "participant_id",
                    type: "string",
                    description: "The ID of the participant (user or agent) to add",
                    required: true
                },
                {
                    name: "role",
                    type: "string",
                    description: "The role to assign: 'owner', 'admin', or 'member' (defaults to 'member')",
                    required: false
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "chat_id");
        validate_required_string!(args, "participant_id");
        if let Some(role) = args["role"].as_str() {
            if !VALID_ROLES.contains(&role.to_lowercase().as_str()) {
                return Err(anyhow!(
                    "Invalid role: {}. Must be one of: {}",
                    role,
                    VALID_ROLES.join(", ")
                ));
            }
        }
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let chat_id = validate_required_string!(args, "chat_id");
        let participant_id = validate_required_string!(args, "participant_id");
        let role = validate_optional_string!(args, "role", "member").to_lowercase();

        tracing::debug!(
            "Adding participant {} to chat {} with role {}",
            participant_id,
            chat_id,
            role
        );

        let request = AddParticipantRequest {
            participant_id: participant_id.to_string(),
            role,
        };
        match self.client.add_agent_chat_participant(chat_id, &request).await {
            Ok(_) => {
                tracing::info!("Participant added successfully: {}", participant_id);
                tool_result!(success: format!("Participant added successfully: {}", participant_id))
            }
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct RemoveAgentChatParticipantTool {
    client: Arc<RestClient>,
}

impl RemoveAgentChatParticipantTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for RemoveAgentChatParticipantTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "remove_agent_chat_participant",
            description: "Remove a participant (user or agent) from a chat room. The acting agent must be the owner or admin of the room.",
            parameters: [
                {
                    name: "chat_id",
                    type: "string",
                    description: "The unique identifier of the chat room",
                    required: true
                },
                {
                    name: "participant_id",
                    type: "string",
                    description: "The participant's ID to remove",
                    required: true
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "chat_id");
        validate_required_string!(args, "participant_id");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let chat_id = validate_required_string!(args, "chat_id");
        let participant_id = validate_required_string!(args, "participant_id");

        tracing::debug!("Removing participant {} from chat {}", participant_id, chat_id);
        match self
            .client
            .remove_agent_chat_participant(chat_id, participant_id)
            .await
        {
            Ok(_) => {
                tracing::info!("Participant removed successfully: {}", participant_id);
                tool_result!(success: format!("Participant removed successfully: {}", participant_id))
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
    async fn test_add_participant_defaults_role_to_member() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/agent/chats/c1/participants"))
            .and(body_json(json!({
                "participant_id": "u7",
                "role": "member"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"id": "u7", "participant_type": "user"}
            })))
            .mount(&mock_server)
            .await;

        let tool = AddAgentChatParticipantTool::new(Arc::new(RestClient::new(
            "thnv_a_k",
            mock_server.uri(),
        )));
        let result = tool
            .execute(json!({"chat_id": "c1", "participant_id": "u7"}))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.output, "Participant added successfully: u7");
    }

    #[tokio::test]
    async fn test_add_participant_rejects_unknown_role() {
        let tool = AddAgentChatParticipantTool::new(Arc::new(RestClient::new(
            "thnv_a_k",
            "http://localhost:1",
        )));
        let err = tool
            .execute(json!({
                "chat_id": "c1",
                "participant_id": "u7",
                "role": "moderator"
            }))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid role: moderator. Must be one of: admin, member, owner"
        );
    }

    #[tokio::test]
    async fn test_remove_participant_confirms_removal() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/agent/chats/c1/participants/u7"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let tool = RemoveAgentChatParticipantTool::new(Arc::new(RestClient::new(
            "thnv_a_k",
            mock_server.uri(),
        )));
        let result = tool
            .execute(json!({"chat_id": "c1", "participant_id": "u7"}))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.output, "Participant removed successfully: u7");
    }

    #[tokio::test]
    async fn test_list_participants_returns_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/agent/chats/c1/participants"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"id": "a2", "participant_type": "agent", "agent_name": "Weather Agent"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let tool = ListAgentChatParticipantsTool::new(Arc::new(RestClient::new(
            "thnv_a_k",
            mock_server.uri(),
        )));
        let result = tool.execute(json!({"chat_id": "c1"})).await.unwrap();

        assert!(result.success);
        assert!(result.output.contains("\"agent_name\": \"Weather Agent\""));
    }
}
