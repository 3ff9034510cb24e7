//! Chat room membership management for the user surface.

use crate::client::types::AddParticipantRequest;
use crate::client::RestClient;
use crate::tools::{serialize_response, Tool, ToolMetadata, ToolResult};
use crate::{tool_metadata, tool_result, validate_optional_string, validate_required_string};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub struct ListUserChatParticipantsTool {
    client: Arc<RestClient>,
}

impl ListUserChatParticipantsTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListUserChatParticipantsTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "list_user_chat_participants",
            description: "List participants in a chat room.",
            parameters: [
                {
                    name: "chat_id",
                    type: "string",
                    description: "The chat room ID",
                    required: true
                },
                {
                    name: "participant_type",
                    type: "string",
                    description: "Filter by type: 'User' or 'Agent'",
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
        let participant_type = args["participant_type"].as_str();

        match self
            .client
            .list_my_chat_participants(chat_id, participant_type)
            .await
        {
            Ok(result) => tool_result!(success: serialize_response(&result)?),
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct AddUserChatParticipantTool {
    client: Arc<RestClient>,
}

impl AddUserChatParticipantTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for AddUserChatParticipantTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "add_user_chat_participant",
            description: "Add a participant to a chat room.",
            parameters: [
                {
                    name: "chat_id",
                    type: "string",
                    description: "The chat room ID",
                    required: true
                },
                {
                    name: "participant_id",
                    type: "string",
                    description: "ID of user or agent to add",
                    required: true
                },
                {
                    name: "role",
                    type: "string",
                    description: "'owner', 'admin', or 'member' (defaults to 'member')",
                    required: false
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
        let role = validate_optional_string!(args, "role", "member");

        let request = AddParticipantRequest {
            participant_id: participant_id.to_string(),
            role: role.to_string(),
        };
        match self.client.add_my_chat_participant(chat_id, &request).await {
            Ok(_) => tool_result!(success: format!("Added participant: {}", participant_id)),
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct RemoveUserChatParticipantTool {
    client: Arc<RestClient>,
}

impl RemoveUserChatParticipantTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for RemoveUserChatParticipantTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "remove_user_chat_participant",
            description: "Remove a participant from a chat room.",
            parameters: [
                {
                    name: "chat_id",
                    type: "string",
                    description: "The chat room ID",
                    required: true
                },
                {
                    name: "participant_id",
                    type: "string",
                    description: "ID of participant to remove",
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

        match self
            .client
            .remove_my_chat_participant(chat_id, participant_id)
            .await
        {
            Ok(_) => tool_result!(success: format!("Removed participant: {}", participant_id)),
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_participants_forwards_type_filter() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/me/chats/c1/participants"))
            .and(query_param("participant_type", "Agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&mock_server)
            .await;

        let tool = ListUserChatParticipantsTool::new(Arc::new(RestClient::new(
            "thnv_u_k",
            mock_server.uri(),
        )));
        let result = tool
            .execute(json!({"chat_id": "c1", "participant_type": "Agent"}))
            .await
            .unwrap();

        assert!(result.success);
    }

    #[tokio::test]
    async fn test_add_participant_passes_role_through() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/me/chats/c1/participants"))
            .and(body_json(json!({"participant_id": "a3", "role": "admin"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"id": "a3", "participant_type": "agent"}
            })))
            .mount(&mock_server)
            .await;

        let tool = AddUserChatParticipantTool::new(Arc::new(RestClient::new(
            "thnv_u_k",
            mock_server.uri(),
        )));
        let result = tool
            .execute(json!({"chat_id": "c1", "participant_id": "a3", "role": "admin"}))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.output, "Added participant: a3");
    }

    #[tokio::test]
    async fn test_remove_participant_confirms() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/me/chats/c1/participants/a3"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let tool = RemoveUserChatParticipantTool::new(Arc::new(RestClient::new(
            "thnv_u_k",
            mock_server.uri(),
        )));
        let result = tool
            .execute(json!({"chat_id": "c1", "participant_id": "a3"}))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.output, "Removed participant: a3");
    }
}
