//! Platform-surface endpoints, authenticated with a legacy platform
//! key. These operate on agents and tool definitions by id rather than
//! on the caller's own identity.

use super::types::{
    AgentProfile, ApiResponse, Chat, CreateToolRequest, ListResponse, PlatformTool,
    UpdateAgentRequest, UpdateToolRequest,
};
use super::{ApiResult, RestClient};

impl RestClient {
    pub async fn list_agents(&self) -> ApiResult<ListResponse<AgentProfile>> {
        self.get("/api/v1/agents", &[]).await
    }

    pub async fn get_agent(&self, agent_id: &str) -> ApiResult<ApiResponse<AgentProfile>> {
        self.get(&format!("/api/v1/agents/{}", agent_id), &[]).await
    }

    pub async fn update_agent(
        &self,
        agent_id: &str,
        request: &UpdateAgentRequest,
    ) -> ApiResult<ApiResponse<AgentProfile>> {
        self.patch(&format!("/api/v1/agents/{}", agent_id), request)
            .await
    }

    pub async fn list_agent_chats_for(
        &self,
        agent_id: &str,
        page: Option<u32>,
        page_size: Option<u32>,
        status: Option<&str>,
        chat_type: Option<&str>,
    ) -> ApiResult<ListResponse<Chat>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = page_size {
            query.push(("page_size", page_size.to_string()));
        }
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }
        if let Some(chat_type) = chat_type {
            query.push(("type", chat_type.to_string()));
        }
        self.get(&format!("/api/v1/agents/{}/chats", agent_id), &query)
            .await
    }

    pub async fn list_platform_tools(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ApiResult<ListResponse<PlatformTool>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = page_size {
            query.push(("page_size", page_size.to_string()));
        }
        self.get("/api/v1/tools", &query).await
    }

    pub async fn get_platform_tool(&self, tool_id: &str) -> ApiResult<ApiResponse<PlatformTool>> {
        self.get(&format!("/api/v1/tools/{}", tool_id), &[]).await
    }

    pub async fn create_platform_tool(
        &self,
        request: &CreateToolRequest,
    ) -> ApiResult<ApiResponse<PlatformTool>> {
        self.post("/api/v1/tools", request).await
    }

    pub async fn update_platform_tool(
        &self,
        tool_id: &str,
        request: &UpdateToolRequest,
    ) -> ApiResult<ApiResponse<PlatformTool>> {
        self.patch(&format!("/api/v1/tools/{}", tool_id), request)
            .await
    }

    pub async fn delete_platform_tool(&self, tool_id: &str) -> ApiResult<()> {
        self.delete(&format!("/api/v1/tools/{}", tool_id)).await
    }
}
