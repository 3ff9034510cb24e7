//! MCP Server - stdio transport
//!
//! Information Hiding:
//! - JSON-RPC framing and dispatch hidden behind `run`
//! - Tool lookup and execution delegated to the registry
//! - stdout carries protocol messages only; all logging goes to stderr

pub mod protocol;

use crate::tools::registry::ToolRegistry;
use anyhow::Result;
use protocol::{
    input_schema, McpRequest, McpResponse, INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR,
    PROTOCOL_VERSION,
};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub struct McpServer {
    registry: ToolRegistry,
    base_url: String,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, base_url: impl Into<String>) -> Self {
        Self {
            registry,
            base_url: base_url.into(),
        }
    }

    /// Serve MCP over stdin/stdout until EOF.
    pub async fn run(&self) -> Result<()> {
        tracing::info!("[McpServer] Starting thenvoi-mcp v{}", env!("CARGO_PKG_VERSION"));
        tracing::info!("[McpServer] Base URL: {}", self.base_url);
        tracing::info!("[McpServer] Server ready - listening for MCP protocol messages on STDIO");

        let mut reader = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;
            if bytes_read == 0 {
                break;
            }

            let raw = line.trim();
            if raw.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(raw).await {
                let payload = serde_json::to_string(&response)?;
                stdout.write_all(payload.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        tracing::info!("[McpServer] stdin closed, shutting down");
        Ok(())
    }

    /// One request line in, at most one response out. Notifications
    /// (requests without an id) produce no response.
    async fn handle_line(&self, raw: &str) -> Option<McpResponse> {
        let request: McpRequest = match serde_json::from_str(raw) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("[McpServer] Failed to parse request: {}", e);
                return Some(McpResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        tracing::debug!("[McpServer] Handling request: {}", request.method);
        let outcome = self.dispatch(&request).await;
        let id = request.id?;

        match outcome {
            Ok(result) => Some(McpResponse::success(id, result)),
            Err((code, message)) => Some(McpResponse::error(id, code, message)),
        }
    }

    async fn dispatch(&self, request: &McpRequest) -> std::result::Result<Value, (i32, String)> {
        match request.method.as_str() {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "thenvoi-mcp",
                    "version": env!("CARGO_PKG_VERSION")
                }
            })),
            "notifications/initialized" => Ok(Value::Null),
            "ping" => Ok(json!({})),
            "tools/list" => {
                let tools = self
                    .registry
                    .list_tools()
                    .iter()
                    .map(|metadata| {
                        json!({
                            "name": metadata.name,
                            "description": metadata.description,
                            "inputSchema": input_schema(metadata),
                        })
                    })
                    .collect::<Vec<_>>();
                Ok(json!({ "tools": tools }))
            }
            "tools/call" => self.call_tool(&request.params).await,
            other => Err((METHOD_NOT_FOUND, format!("Method not found: {}", other))),
        }
    }

    async fn call_tool(&self, params: &Value) -> std::result::Result<Value, (i32, String)> {
        let name = match params["name"].as_str() {
            Some(name) => name,
            None => return Err((INVALID_PARAMS, "Missing tool name".to_string())),
        };
        let tool = match self.registry.get(name) {
            Some(tool) => tool,
            None => return Err((INVALID_PARAMS, format!("Unknown tool: {}", name))),
        };

        let arguments = if params["arguments"].is_null() {
            json!({})
        } else {
            params["arguments"].clone()
        };

        tracing::debug!("[McpServer] Calling tool: {}", name);
        // Argument validation failures and upstream API failures both
        // surface as isError results, not protocol errors.
        let (text, is_error) = match tool.execute(arguments).await {
            Ok(result) => {
                if result.success {
                    (result.output, false)
                } else {
                    (result.error.unwrap_or_default(), true)
                }
            }
            Err(e) => (e.to_string(), true),
        };

        Ok(json!({
            "content": [
                {
                    "type": "text",
                    "text": text
                }
            ],
            "isError": is_error
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RestClient;
    use crate::config::ApiKeyKind;
    use std::sync::Arc;

    fn server() -> McpServer {
        let client = Arc::new(RestClient::new("", "http://localhost:1"));
        let registry = ToolRegistry::for_key_kind(ApiKeyKind::Unknown, client);
        McpServer::new(registry, "http://localhost:1")
    }

    #[tokio::test]
    async fn test_initialize_reports_capabilities() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "thenvoi-mcp");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;

        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_parse_error_answers_with_null_id() {
        let response = server().handle_line("{not json").await.unwrap();

        assert!(response.id.is_null());
        assert_eq!(response.error.unwrap().code, PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_method_is_rejected() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"resources/list"}"#)
            .await
            .unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, METHOD_NOT_FOUND);
        assert!(error.message.contains("resources/list"));
    }

    #[tokio::test]
    async fn test_tools_list_renders_input_schema() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":3,"method":"tools/list"}"#)
            .await
            .unwrap();

        let result = response.result.unwrap();
        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "health_check");
        assert_eq!(tools[0]["inputSchema"]["type"], "object");
    }

    #[tokio::test]
    async fn test_call_unknown_tool_is_invalid_params() {
        let response = server()
            .handle_line(
                r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"nope"}}"#,
            )
            .await
            .unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, INVALID_PARAMS);
        assert!(error.message.contains("nope"));
    }

    #[tokio::test]
    async fn test_call_tool_wraps_output_as_text_content() {
        let response = server()
            .handle_line(
                r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"health_check"}}"#,
            )
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["isError"], false);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Health check failed"));
    }

    #[tokio::test]
    async fn test_ping_answers_empty_result() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":6,"method":"ping"}"#)
            .await
            .unwrap();

        assert!(response.result.unwrap().as_object().unwrap().is_empty());
        assert!(response.error.is_none());
    }
}
