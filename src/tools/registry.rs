//! Tool Registry
//!
//! Information Hiding:
//! - Tool storage and lookup implementation hidden
//! - Key-kind to tool-group mapping hidden
//! - Registration and discovery mechanisms abstracted

use super::{Tool, ToolMetadata};
use crate::client::RestClient;
use crate::config::ApiKeyKind;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool registry for managing available tools
///
/// Provides centralized tool management with dynamic registration
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a new tool
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.metadata().name.clone();
        tracing::info!("Registering tool: {}", name);
        self.tools.insert(name, tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get all tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Get all tool metadata
    pub fn list_tools(&self) -> Vec<ToolMetadata> {
        self.tools.values().map(|tool| tool.metadata()).collect()
    }

    /// Get tool metadata as a formatted listing
    pub fn tools_description(&self) -> String {
        let mut descriptions = Vec::new();
        for tool in self.tools.values() {
            let metadata = tool.metadata();
            let params = metadata
                .parameters
                .iter()
                .map(|p| {
                    let required = if p.required { "required" } else { "optional" };
                    format!("  - {} ({}): {} [{}]", p.name, p.param_type, p.description, required)
                })
                .collect::<Vec<_>>()
                .join("\n");

            descriptions.push(format!(
                "Tool: {}\nDescription: {}\nParameters:\n{}",
                metadata.name, metadata.description, params
            ));
        }
        descriptions.join("\n\n")
    }

    /// Build the registry for an API key kind. The key prefix decides
    /// which tool group is exposed; the health check is always there.
    pub fn for_key_kind(kind: ApiKeyKind, client: Arc<RestClient>) -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(super::health::HealthCheckTool::new(
            client.clone(),
            kind,
        )));

        match kind {
            ApiKeyKind::AgentKey => registry.register_agent_tools(client),
            ApiKeyKind::UserKey => registry.register_user_tools(client),
            ApiKeyKind::LegacyKey => registry.register_platform_tools(client),
            ApiKeyKind::Unknown => {
                tracing::warn!(
                    "Unrecognized API key prefix; expected thnv_a_ (agent), thnv_u_ (user), or thnv_ (platform). Only health_check is available."
                );
            }
        }

        registry
    }

    fn register_agent_tools(&mut self, client: Arc<RestClient>) {
        use super::agent::{chats, events, identity, lifecycle, messages, participants};

        self.register(Arc::new(identity::GetAgentMeTool::new(client.clone())));
        self.register(Arc::new(identity::ListAgentPeersTool::new(client.clone())));
        self.register(Arc::new(chats::ListAgentChatsTool::new(client.clone())));
        self.register(Arc::new(chats::GetAgentChatTool::new(client.clone())));
        self.register(Arc::new(chats::CreateAgentChatTool::new(client.clone())));
        self.register(Arc::new(messages::GetAgentChatContextTool::new(client.clone())));
        self.register(Arc::new(messages::CreateAgentChatMessageTool::new(client.clone())));
        self.register(Arc::new(events::CreateAgentChatEventTool::new(client.clone())));
        self.register(Arc::new(participants::ListAgentChatParticipantsTool::new(client.clone())));
        self.register(Arc::new(participants::AddAgentChatParticipantTool::new(client.clone())));
        self.register(Arc::new(participants::RemoveAgentChatParticipantTool::new(client.clone())));
        self.register(Arc::new(lifecycle::MarkAgentMessageProcessingTool::new(client.clone())));
        self.register(Arc::new(lifecycle::MarkAgentMessageProcessedTool::new(client.clone())));
        self.register(Arc::new(lifecycle::MarkAgentMessageFailedTool::new(client)));
    }

    fn register_user_tools(&mut self, client: Arc<RestClient>) {
        use super::user::{agents, chats, messages, participants, profile};

        self.register(Arc::new(chats::ListUserChatsTool::new(client.clone())));
        self.register(Arc::new(chats::GetUserChatTool::new(client.clone())));
        self.register(Arc::new(chats::CreateUserChatTool::new(client.clone())));
        self.register(Arc::new(messages::ListUserChatMessagesTool::new(client.clone())));
        self.register(Arc::new(messages::SendUserChatMessageTool::new(client.clone())));
        self.register(Arc::new(participants::ListUserChatParticipantsTool::new(client.clone())));
        self.register(Arc::new(participants::AddUserChatParticipantTool::new(client.clone())));
        self.register(Arc::new(participants::RemoveUserChatParticipantTool::new(client.clone())));
        self.register(Arc::new(profile::GetUserProfileTool::new(client.clone())));
        self.register(Arc::new(profile::UpdateUserProfileTool::new(client.clone())));
        self.register(Arc::new(profile::ListUserPeersTool::new(client.clone())));
        self.register(Arc::new(agents::ListUserAgentsTool::new(client.clone())));
        self.register(Arc::new(agents::RegisterUserAgentTool::new(client)));
    }

    fn register_platform_tools(&mut self, client: Arc<RestClient>) {
        use super::platform::{agents, tools};

        self.register(Arc::new(agents::ListAgentsTool::new(client.clone())));
        self.register(Arc::new(agents::GetAgentTool::new(client.clone())));
        self.register(Arc::new(agents::UpdateAgentTool::new(client.clone())));
        self.register(Arc::new(agents::ListAgentChatsTool::new(client.clone())));
        self.register(Arc::new(tools::ListToolsTool::new(client.clone())));
        self.register(Arc::new(tools::GetToolTool::new(client.clone())));
        self.register(Arc::new(tools::CreateToolTool::new(client.clone())));
        self.register(Arc::new(tools::UpdateToolTool::new(client.clone())));
        self.register(Arc::new(tools::DeleteToolTool::new(client)));
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Arc<RestClient> {
        Arc::new(RestClient::new("thnv_a_test", "http://localhost:1"))
    }

    #[test]
    fn test_agent_key_exposes_agent_tools() {
        let registry = ToolRegistry::for_key_kind(ApiKeyKind::AgentKey, client());

        assert_eq!(registry.tool_names().len(), 15);
        assert!(registry.has_tool("health_check"));
        assert!(registry.has_tool("getAgentMe"));
        assert!(registry.has_tool("createAgentChatMessage"));
        assert!(registry.has_tool("markAgentMessageFailed"));
        assert!(!registry.has_tool("get_user_profile"));
        assert!(!registry.has_tool("delete_tool"));
    }

    #[test]
    fn test_user_key_exposes_user_tools() {
        let registry = ToolRegistry::for_key_kind(ApiKeyKind::UserKey, client());

        assert_eq!(registry.tool_names().len(), 14);
        assert!(registry.has_tool("send_user_chat_message"));
        assert!(registry.has_tool("register_user_agent"));
        assert!(!registry.has_tool("createAgentChatMessage"));
    }

    #[test]
    fn test_legacy_key_exposes_platform_tools() {
        let registry = ToolRegistry::for_key_kind(ApiKeyKind::LegacyKey, client());

        assert_eq!(registry.tool_names().len(), 10);
        assert!(registry.has_tool("list_agents"));
        assert!(registry.has_tool("update_agent"));
        assert!(registry.has_tool("delete_tool"));
        assert!(!registry.has_tool("getAgentMe"));
    }

    #[test]
    fn test_unknown_key_exposes_only_health_check() {
        let registry = ToolRegistry::for_key_kind(ApiKeyKind::Unknown, client());

        assert_eq!(registry.tool_names(), vec!["health_check".to_string()]);
    }

    #[test]
    fn test_tools_description_lists_parameters() {
        let registry = ToolRegistry::for_key_kind(ApiKeyKind::AgentKey, client());
        let description = registry.tools_description();

        assert!(description.contains("Tool: createAgentChatMessage"));
        assert!(description.contains("Description:"));
        assert!(description.contains("  - chatId (string):"));
    }
}
