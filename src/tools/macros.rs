//! Tool Definition Macros
//!
//! Simplifies tool creation by reducing boilerplate

/// Define tool metadata using a declarative syntax
///
/// # Example
/// ```ignore
/// tool_metadata! {
///     name: "get_user_chat",
///     description: "Get a specific chat room by ID",
///     parameters: [
///         {
///             name: "chat_id",
///             type: "string",
///             description: "The chat room ID",
///             required: true
///         }
///     ]
/// }
/// ```
#[macro_export]
macro_rules! tool_metadata {
    (
        name: $name:expr,
        description: $description:expr,
        parameters: [
            $(
                {
                    name: $param_name:expr,
                    type: $param_type:expr,
                    description: $param_desc:expr,
                    required: $param_required:expr
                }
            ),* $(,)?
        ]
    ) => {
        $crate::tools::ToolMetadata {
            name: $name.to_string(),
            description: $description.to_string(),
            parameters: vec![
                $(
                    $crate::tools::ToolParameter {
                        name: $param_name.to_string(),
                        param_type: $param_type.to_string(),
                        description: $param_desc.to_string(),
                        required: $param_required,
                    }
                ),*
            ],
        }
    };
}

/// Validate required string parameter
#[macro_export]
macro_rules! validate_required_string {
    ($args:expr, $param:expr) => {
        $args[$param].as_str().ok_or_else(|| {
            anyhow::anyhow!("'{}' parameter is required and must be a string", $param)
        })?
    };
}

/// Validate optional string parameter
#[macro_export]
macro_rules! validate_optional_string {
    ($args:expr, $param:expr, $default:expr) => {
        $args[$param].as_str().unwrap_or($default)
    };
}

/// Generate tool result helpers
#[macro_export]
macro_rules! tool_result {
    (success: $msg:expr) => {
        Ok($crate::tools::ToolResult::success($msg))
    };
    (failure: $msg:expr) => {
        Ok($crate::tools::ToolResult::failure($msg))
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_tool_metadata_macro() {
        let metadata = tool_metadata! {
            name: "list_user_chats",
            description: "List chat rooms where the user is a participant",
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
        };

        assert_eq!(metadata.name, "list_user_chats");
        assert_eq!(metadata.parameters.len(), 2);
        assert_eq!(metadata.parameters[0].name, "page");
        assert_eq!(metadata.parameters[0].required, false);
    }

    #[test]
    fn test_validate_macros() {
        let args = serde_json::json!({"chat_id": "c1"});

        let chat_id = args["chat_id"].as_str();
        assert_eq!(chat_id, Some("c1"));

        let role = validate_optional_string!(args, "role", "member");
        assert_eq!(role, "member");
    }
}
