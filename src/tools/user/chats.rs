//! Chat room listing and creation for the user surface.

use crate::client::types::CreateChatRequest;
use crate::client::RestClient;
use crate::tools::{serialize_response, Tool, ToolMetadata, ToolResult};
use crate::{tool_metadata, tool_result, validate_required_string};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub struct ListUserChatsTool {
    client: Arc<RestClient>,
}

impl ListUserChatsTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListUserChatsTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "list_user_chats",
            description: "List chat rooms where the user is a participant.",
            parameters: [
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
        let page = args["page"].as_u64().map(|v| v as u32);
        let page_size = args["page_size"].as_u64().map(|v| v as u32);

        match self.client.list_my_chats(page, page_size).await {
            Ok(result) => tool_result!(success: serialize_response(&result)?),
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct GetUserChatTool {
    client: Arc<RestClient>,
}

impl GetUserChatTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetUserChatTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "get_user_chat",
            description: "Get a specific chat room by ID.",
            parameters: [
                {
                    name: "chat_id",
                    type: "string",
                    description: "The chat room ID",
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

        match self.client.get_my_chat(chat_id).await {
            Ok(result) => tool_result!(success: serialize_response(&result)?),
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct CreateUserChatTool {
    client: Arc<RestClient>,
}

impl CreateUserChatTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CreateUserChatTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "create_user_chat",
            description: "Create a new chat room with the user as owner.",
            parameters: [
                {
                    name: "task_id",
                    type: "string",
                    description: "Optional task ID to associate with the chat",
                    required: false
                }
            ]
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        let request = CreateChatRequest {
            task_id: args["task_id"].as_str().map(String::from),
        };

        match self.client.create_my_chat(&request).await {
            Ok(result) => tool_result!(success: serialize_response(&result)?),
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_chats_forwards_pagination() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/me/chats"))
            .and(query_param("page", "2"))
            .and(query_param("page_size", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "c1"}],
                "total": 11
            })))
            .mount(&mock_server)
            .await;

        let tool = ListUserChatsTool::new(Arc::new(RestClient::new(
            "thnv_u_k",
            mock_server.uri(),
        )));
        let result = tool
            .execute(json!({"page": 2, "page_size": 10}))
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.output.contains("\"total\": 11"));
    }

    #[tokio::test]
    async fn test_create_chat_without_task_id_sends_empty_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/me/chats"))
            .and(wiremock::matchers::body_json(json!({})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"id": "c9"}
            })))
            .mount(&mock_server)
            .await;

        let tool = CreateUserChatTool::new(Arc::new(RestClient::new(
            "thnv_u_k",
            mock_server.uri(),
        )));
        let result = tool.execute(json!({})).await.unwrap();

        assert!(result.success);
        assert!(result.output.contains("\"id\": \"c9\""));
    }

    #[tokio::test]
    async fn test_get_chat_requires_chat_id() {
        let tool = GetUserChatTool::new(Arc::new(RestClient::new(
            "thnv_u_k",
            "http://localhost:1",
        )));
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(err.to_string().contains("'chat_id'"));
    }
}
