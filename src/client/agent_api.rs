//! Agent-surface endpoints (`/api/v1/agent/...`), authenticated with an
//! agent API key. The acting agent is implicit in the key; no agent id
//! appears in these paths.

use super::types::{
    AddParticipantRequest, AgentProfile, ApiResponse, Chat, ChatEventRequest, ChatMessage,
    ChatMessageRequest, CreateChatRequest, FailMessageRequest, ListResponse, Participant,
};
use super::{ApiResult, RestClient};
use serde_json::Value;

impl RestClient {
    pub async fn get_agent_me(&self) -> ApiResult<ApiResponse<AgentProfile>> {
        self.get("/api/v1/agent/me", &[]).await
    }

    pub async fn list_agent_peers(
        &self,
        not_in_chat: Option<&str>,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ApiResult<ListResponse<Value>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(chat_id) = not_in_chat {
            query.push(("not_in_chat", chat_id.to_string()));
        }
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = page_size {
            query.push(("page_size", page_size.to_string()));
        }
        self.get("/api/v1/agent/peers", &query).await
    }

    pub async fn list_agent_chats(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ApiResult<ListResponse<Chat>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = page_size {
            query.push(("page_size", page_size.to_string()));
        }
        self.get("/api/v1/agent/chats", &query).await
    }

    pub async fn get_agent_chat(&self, chat_id: &str) -> ApiResult<ApiResponse<Chat>> {
        self.get(&format!("/api/v1/agent/chats/{}", chat_id), &[])
            .await
    }

    pub async fn create_agent_chat(
        &self,
        request: &CreateChatRequest,
    ) -> ApiResult<ApiResponse<Chat>> {
        self.post("/api/v1/agent/chats", request).await
    }

    /// All messages the agent sent plus text messages that mention it,
    /// oldest first. Used for execution context rehydration.
    pub async fn get_agent_chat_context(
        &self,
        chat_id: &str,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ApiResult<ListResponse<ChatMessage>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = page_size {
            query.push(("page_size", page_size.to_string()));
        }
        self.get(&format!("/api/v1/agent/chats/{}/context", chat_id), &query)
            .await
    }

    pub async fn list_agent_chat_participants(
        &self,
        chat_id: &str,
    ) -> ApiResult<ListResponse<Participant>> {
        self.get(&format!("/api/v1/agent/chats/{}/participants", chat_id), &[])
            .await
    }

    pub async fn add_agent_chat_participant(
        &self,
        chat_id: &str,
        request: &AddParticipantRequest,
    ) -> ApiResult<ApiResponse<Participant>> {
        self.post(&format!("/api/v1/agent/chats/{}/participants", chat_id), request)
            .await
    }

    pub async fn remove_agent_chat_participant(
        &self,
        chat_id: &str,
        participant_id: &str,
    ) -> ApiResult<()> {
        self.delete(&format!(
            "/api/v1/agent/chats/{}/participants/{}",
            chat_id, participant_id
        ))
        .await
    }

    pub async fn create_agent_chat_message(
        &self,
        chat_id: &str,
        request: &ChatMessageRequest,
    ) -> ApiResult<ApiResponse<ChatMessage>> {
        self.post(&format!("/api/v1/agent/chats/{}/messages", chat_id), request)
            .await
    }

    pub async fn create_agent_chat_event(
        &self,
        chat_id: &str,
        request: &ChatEventRequest,
    ) -> ApiResult<ApiResponse<ChatMessage>> {
        self.post(&format!("/api/v1/agent/chats/{}/events", chat_id), request)
            .await
    }

    /// Opens a processing attempt for the message; timestamps are
    /// system-managed upstream.
    pub async fn mark_agent_message_processing(
        &self,
        chat_id: &str,
        message_id: &str,
    ) -> ApiResult<ApiResponse<ChatMessage>> {
        self.post_empty(&format!(
            "/api/v1/agent/chats/{}/messages/{}/processing",
            chat_id, message_id
        ))
        .await
    }

    pub async fn mark_agent_message_processed(
        &self,
        chat_id: &str,
        message_id: &str,
    ) -> ApiResult<ApiResponse<ChatMessage>> {
        self.post_empty(&format!(
            "/api/v1/agent/chats/{}/messages/{}/processed",
            chat_id, message_id
        ))
        .await
    }

    pub async fn mark_agent_message_failed(
        &self,
        chat_id: &str,
        message_id: &str,
        error: &str,
    ) -> ApiResult<ApiResponse<ChatMessage>> {
        let request = FailMessageRequest {
            error: error.to_string(),
        };
        self.post(
            &format!("/api/v1/agent/chats/{}/messages/{}/failed", chat_id, message_id),
            &request,
        )
        .await
    }
}
