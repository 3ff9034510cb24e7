//! Tool definition management.
//!
//! List and get flatten the upstream envelope into a compact shape
//! with just the fields callers act on; schemas pass through without
//! validation.

use crate::client::types::{CreateToolRequest, PlatformTool, UpdateToolRequest};
use crate::client::RestClient;
use crate::tools::{serialize_response, Tool, ToolMetadata, ToolResult};
use crate::{tool_metadata, tool_result, validate_required_string};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

fn tool_summary(tool: &PlatformTool) -> Value {
    json!({
        "id": tool.id,
        "name": tool.name,
        "description": tool.description,
        "json_schema": tool.json_schema,
        "connection_config": tool.connection_config,
    })
}

fn parse_json_arg(args: &Value, key: &str) -> Result<Option<Value>> {
    match args[key].as_str() {
        Some(raw) => serde_json::from_str::<Value>(raw)
            .map(Some)
            .map_err(|e| {
                tracing::error!("Invalid JSON for {}: {}", key, e);
                anyhow!("Invalid JSON for {}: {}", key, e)
            }),
        None => Ok(None),
    }
}

pub struct ListToolsTool {
    client: Arc<RestClient>,
}

impl ListToolsTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListToolsTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "list_tools",
            description: "List available tool definitions with pagination.",
            parameters: [
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
                }
            ]
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        let page = args["page"].as_u64().map(|v| v as u32);
        let page_size = args["page_size"].as_u64().map(|v| v as u32);

        tracing::debug!("Fetching list of tools");
        match self.client.list_platform_tools(page, page_size).await {
            Ok(result) => {
                let summaries = result.data.iter().map(tool_summary).collect::<Vec<_>>();
                tracing::info!("Retrieved {} tools", summaries.len());
                let reshaped = json!({
                    "tools": summaries,
                    "page": result.page,
                    "page_size": result.page_size,
                    "total": result.total,
                });
                tool_result!(success: serialize_response(&reshaped)?)
            }
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct GetToolTool {
    client: Arc<RestClient>,
}

impl GetToolTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetToolTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "get_tool",
            description: "Get detailed information about a single tool definition by ID.",
            parameters: [
                {
                    name: "tool_id",
                    type: "string",
                    description: "The unique identifier of the tool to retrieve",
                    required: true
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "tool_id");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let tool_id = validate_required_string!(args, "tool_id");

        tracing::debug!("Fetching tool with ID: {}", tool_id);
        match self.client.get_platform_tool(tool_id).await {
            Ok(result) => match &result.data {
                Some(tool) => {
                    tracing::info!("Retrieved tool: {}", tool_id);
                    tool_result!(success: serialize_response(&tool_summary(tool))?)
                }
                None => tool_result!(failure: format!("Tool not found: {}", tool_id)),
            },
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct CreateToolTool {
    client: Arc<RestClient>,
}

impl CreateToolTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CreateToolTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "create_tool",
            description: "Create a new tool definition. Tools define capabilities that agents can use to perform actions.",
            parameters: [
                {
                    name: "name",
                    type: "string",
                    description: "The name of the tool",
                    required: true
                },
                {
                    name: "description",
                    type: "string",
                    description: "Description of the tool's purpose and functionality",
                    required: true
                },
                {
                    name: "json_schema",
                    type: "string",
                    description: "Optional JSON schema defining the tool's parameters (as JSON string), passed through without validation",
                    required: false
                },
                {
                    name: "connection_config",
                    type: "string",
                    description: "Optional connection configuration (as JSON string)",
                    required: false
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "name");
        validate_required_string!(args, "description");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let name = validate_required_string!(args, "name");
        let description = validate_required_string!(args, "description");

        tracing::debug!("Creating tool: {}", name);

        let request = CreateToolRequest {
            name: name.to_string(),
            description: description.to_string(),
            json_schema: parse_json_arg(&args, "json_schema")?,
            connection_config: parse_json_arg(&args, "connection_config")?,
        };
        match self.client.create_platform_tool(&request).await {
            Ok(result) => match &result.data {
                Some(tool) => {
                    tracing::info!("Tool created successfully: {}", tool.id);
                    tool_result!(success: format!("Tool created successfully: {}", tool.id))
                }
                None => {
                    tracing::error!("Tool created but response data is None");
                    tool_result!(failure: "Tool created but ID not available in response")
                }
            },
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct UpdateToolTool {
    client: Arc<RestClient>,
}

impl UpdateToolTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for UpdateToolTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "update_tool",
            description: "Update an existing tool definition. Only the fields provided are updated.",
            parameters: [
                {
                    name: "tool_id",
                    type: "string",
                    description: "The unique identifier of the tool to update",
                    required: true
                },
                {
                    name: "name",
                    type: "string",
                    description: "New name for the tool",
                    required: false
                },
                {
                    name: "description",
                    type: "string",
                    description: "New description",
                    required: false
                },
                {
                    name: "json_schema",
                    type: "string",
                    description: "New JSON schema (as JSON string), passed through without validation",
                    required: false
                },
                {
                    name: "connection_config",
                    type: "string",
                    description: "New connection configuration (as JSON string)",
                    required: false
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "tool_id");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let tool_id = validate_required_string!(args, "tool_id");

        tracing::debug!("Updating tool: {}", tool_id);

        let request = UpdateToolRequest {
            name: args["name"].as_str().map(String::from),
            description: args["description"].as_str().map(String::from),
            json_schema: parse_json_arg(&args, "json_schema")?,
            connection_config: parse_json_arg(&args, "connection_config")?,
        };
        match self.client.update_platform_tool(tool_id, &request).await {
            Ok(result) => match &result.data {
                Some(tool) => {
                    tracing::info!("Tool updated successfully: {}", tool.id);
                    tool_result!(success: format!("Tool updated successfully: {}", tool.id))
                }
                None => {
                    tracing::error!("Tool {} updated but response data is None", tool_id);
                    tool_result!(failure: "Tool updated but ID not available in response")
                }
            },
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}

pub struct DeleteToolTool {
    client: Arc<RestClient>,
}

impl DeleteToolTool {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for DeleteToolTool {
    fn metadata(&self) -> ToolMetadata {
        tool_metadata! {
            name: "delete_tool",
            description: "Permanently delete a tool definition. This action cannot be undone.",
            parameters: [
                {
                    name: "tool_id",
                    type: "string",
                    description: "The unique identifier of the tool to delete",
                    required: true
                }
            ]
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        validate_required_string!(args, "tool_id");
        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;
        let tool_id = validate_required_string!(args, "tool_id");

        tracing::debug!("Deleting tool: {}", tool_id);
        match self.client.delete_platform_tool(tool_id).await {
            Ok(_) => {
                tracing::info!("Tool deleted successfully: {}", tool_id);
                tool_result!(success: format!("Tool deleted successfully: {}", tool_id))
            }
            Err(e) => tool_result!(failure: e.to_string()),
        }
    }
}
