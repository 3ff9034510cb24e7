//! Agent ownership: listing and registering external agents.

use crate::client::types::RegisterAgentRequest;
use crate::client::RestClient;
use crate::tools::{serialize_response, Tool, ToolMetadata, ToolResult};
use crate::{tool_metadata, tool_result, validate_required_string};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub struct ListUserAgentsTool {
    client: Arc<RestClient>,
}

impl ListUserAgentsTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListUserAgentsTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "list_user_agents",
            description: "List agents owned by the user.",
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

        match self.client.list_my_agents(page, page_size).await {
            Ok(result) => tool_result!(success: serialize_response(&result)?),
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct RegisterUserAgentTool {
    client: Arc<RestClient>,
}

impl RegisterUserAgentTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for RegisterUserAgentTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "register_user_agent",
            description: "Register a new external agent. Returns the agent details including its API key; save the key, it is only shown once.",
            parameters: [
                {
                    name: "name",
                    type: "string",
                    description: "Agent name",
                    required: true
                },
                {
                    name: "description",
                    type: "string",
                    description: "Agent description",
                    required: false
                },
                {
                    name: "model_type",
                    type: "string",
                    description: "AI model type",
                    required: false
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "name");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let name = validate_required_string!(args, "name");

        let request = RegisterAgentRequest {
            name: name.to_string(),
            description: args["description"].as_str().map(String::from),
            model_type: args["model_type"].as_str().map(String::from),
        };
        match self.client.register_my_agent(&request).await {
            Ok(result) => tool_result!(success: serialize_response(&result)?),
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
    async fn test_register_agent_sends_only_provided_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/me/agents"))
            .and(body_json(json!({"name": "scout"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"id": "a9", "name": "scout", "api_key": "thnv_a_secret"}
            })))
            .mount(&mock_server)
            .await;

        let tool = RegisterUserAgentTool::new(Arc::new(RestClient::new(
            "thnv_u_k",
            mock_server.uri(),
        )));
        let result = tool.execute(json!({"name": "scout"})).await.unwrap();

        assert!(result.success);
        assert!(result.output.contains("thnv_a_secret"));
    }

    #[tokio::test]
    async fn test_register_agent_requires_name() {
        let tool = RegisterUserAgentTool::new(Arc::new(RestClient::new(
            "thnv_u_k",
            "http://localhost:1",
        )));
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(err.to_string().contains("'name'"));
    }
}
