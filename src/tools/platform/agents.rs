//! Agent administration: listing, inspection, and partial updates.

use crate::client::types::UpdateAgentRequest;
use crate::client::RestClient;
use crate::tools::{serialize_response, Tool, ToolMetadata, ToolResult};
use crate::{tool_metadata, tool_result, validate_required_string};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub struct ListAgentsTool {
    client: Arc<RestClient>,
}

impl ListAgentsTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListAgentsTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "list_agents",
            description: "List all accessible agents with their ID, name, model type, description, and other metadata.",
            parameters: []
        }
    }

    async fn execute(&self, _args: Value) -> Result<ToolResult> {
        tracing::debug!("Fetching list of agents");
        match self.client.list_agents().await {
            Ok(result) => {
                tracing::info!("Retrieved {} agents", result.data.len());
                tool_result!(success: serialize_response(&result)?)
            }
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct GetAgentTool {
    client: Arc<RestClient>,
}

impl GetAgentTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetAgentTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "get_agent",
            description: "Get detailed information about a single agent by ID.",
            parameters: [
                {
                    name: "agent_id",
                    type: "string",
                    description: "The unique identifier of the agent to retrieve",
                    required: true
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "agent_id");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let agent_id = validate_required_string!(args, "agent_id");

        tracing::debug!("Fetching agent with ID: {}", agent_id);
        match self.client.get_agent(agent_id).await {
            Ok(result) => {
                tracing::info!("Retrieved agent: {}", agent_id);
                tool_result!(success: serialize_response(&result)?)
            }
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

/// Partial update: only the provided fields reach the wire, everything
/// else stays unchanged upstream.
pub struct UpdateAgentTool {
    client: Arc<RestClient>,
}

impl UpdateAgentTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for UpdateAgentTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "update_agent",
            description: "Update an existing agent's configuration. Only the fields provided are updated.",
            parameters: [
                {
                    name: "agent_id",
                    type: "string",
                    description: "The unique identifier of the agent to update",
                    required: true
                },
                {
                    name: "name",
                    type: "string",
                    description: "New name for the agent",
                    required: false
                },
                {
                    name: "model_type",
                    type: "string",
                    description: "New AI model type to use",
                    required: false
                },
                {
                    name: "description",
                    type: "string",
                    description: "New description",
                    required: false
                },
                {
                    name: "system_prompt_id",
                    type: "string",
                    description: "New system prompt ID",
                    required: false
                },
                {
                    name: "is_external",
                    type: "boolean",
                    description: "Update external flag",
                    required: false
                },
                {
                    name: "is_global",
                    type: "boolean",
                    description: "Update global flag",
                    required: false
                },
                {
                    name: "organization_id",
                    type: "string",
                    description: "New organization ID",
                    required: false
                },
                {
                    name: "structured_output_schema",
                    type: "string",
                    description: "New JSON string for structured outputs (parsed as JSON)",
                    required: false
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "agent_id");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let agent_id = validate_required_string!(args, "agent_id");

        tracing::debug!("Updating agent: {}", agent_id);

        let structured_output_schema = match args["structured_output_schema"].as_str() {
            Some(raw) => Some(serde_json::from_str::<Value>(raw).map_err(|e| {
                tracing::error!("Invalid JSON for structured_output_schema: {}", e);
                anyhow!("Invalid JSON for structured_output_schema: {}", e)
            })?),
            None => None,
        };

        let request = UpdateAgentRequest {
            name: args["name"].as_str().map(String::from),
            model_type: args["model_type"].as_str().map(String::from),
            description: args["description"].as_str().map(String::from),
            system_prompt_id: args["system_prompt_id"].as_str().map(String::from),
            is_external: args["is_external"].as_bool(),
            is_global: args["is_global"].as_bool(),
            organization_id: args["organization_id"].as_str().map(String::from),
            structured_output_schema,
        };
        match self.client.update_agent(agent_id, &request).await {
            Ok(result) => match &result.data {
                Some(agent) => {
                    tracing::info!("Agent updated successfully: {}", agent.id);
                    tool_result!(success: format!("Agent updated successfully: {}", agent.id))
                }
                None => {
                    tracing::error!("Agent {} updated but response data is None", agent_id);
                    tool_result!(failure: "Agent updated but ID not available in response")
                }
            },
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

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
            name: "list_agent_chats",
            description: "List all chat rooms where an agent participates, with optional status and type filters.",
            parameters: [
                {
                    name: "agent_id",
                    type: "string",
                    description: "The unique identifier of the agent",
                    required: true
                },
                {
                    name: "page",
                    type: "number",
                    description: "Page number for pagination",
                    required: false
                },
                {
                    name: "page_size",
                    type: "number",
                    description: "Number of items per page",
                    required: false
                },
                {
                    name: "status",
                    type: "string",
                    description: "Filter by chat status: 'active', 'archived', or 'closed'",
                    required: false
                },
                {
                    name: "chat_type",
                    type: "string",
                    description: "Filter by chat type: 'direct', 'group', or 'task'",
                    required: false
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "agent_id");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let agent_id = validate_required_string!(args, "agent_id");
        let page = args["page"].as_u64().map(|v| v as u32);
        let page_size = args["page_size"].as_u64().map(|v| v as u32);
        let status = args["status"].as_str();
        let chat_type = args["chat_type"].as_str();

        tracing::debug!("Fetching chats for agent: {}", agent_id);
        match self
            .client
            .list_agent_chats_for(agent_id, page, page_size, status, chat_type)
            .await
        {
            Ok(result) => {
                tracing::info!("Retrieved {} chats for agent: {}", result.data.len(), agent_id);
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
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_update_agent_sends_only_provided_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/api/v1/agents/a1"))
            .and(body_json(json!({
                "name": "router",
                "is_global": true,
                "structured_output_schema": {"type": "object"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"id": "a1", "name": "router"}
            })))
            .mount(&mock_server)
            .await;

        let tool = UpdateAgentTool::new(Arc::new(RestClient::new(
            "thnv_k",
            mock_server.uri(),
        )));
        let result = tool
            .execute(json!({
                "agent_id": "a1",
                "name": "router",
                "is_global": true,
                "structured_output_schema": "{\"type\": \"object\"}"
            }))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.output, "Agent updated successfully: a1");
    }

    #[tokio::test]
    async fn test_update_agent_rejects_bad_schema_json() {
        let tool = UpdateAgentTool::new(Arc::new(RestClient::new(
            "thnv_k",
            "http://localhost:1",
        )));
        let err = tool
            .execute(json!({
                "agent_id": "a1",
                "structured_output_schema": "{oops"
            }))
            .await
            .unwrap_err();

        assert!(err
            .to_string()
            .starts_with("Invalid JSON for structured_output_schema:"));
    }

    #[tokio::test]
    async fn test_list_agent_chats_maps_chat_type_to_type_param() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/agents/a1/chats"))
            .and(query_param("status", "active"))
            .and(query_param("type", "group"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&mock_server)
            .await;

        let tool = ListAgentChatsTool::new(Arc::new(RestClient::new(
            "thnv_k",
            mock_server.uri(),
        )));
        let result = tool
            .execute(json!({"agent_id": "a1", "status": "active", "chat_type": "group"}))
            .await
            .unwrap();

        assert!(result.success);
    }
}
