//! User-surface endpoints (`/api/v1/me/...`), authenticated with a user
//! API key. The acting user is implicit in the key.

use super::types::{
    AddParticipantRequest, AgentProfile, ApiResponse, Chat, ChatMessage, ChatMessageRequest,
    CreateChatRequest, ListResponse, Participant, RegisterAgentRequest, UpdateProfileRequest,
    UserProfile,
};
use super::{ApiResult, RestClient};
use serde_json::Value;

impl RestClient {
    pub async fn get_my_profile(&self) -> ApiResult<ApiResponse<UserProfile>> {
        self.get("/api/v1/me/profile", &[]).await
    }

    pub async fn update_my_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> ApiResult<ApiResponse<UserProfile>> {
        self.patch("/api/v1/me/profile", request).await
    }

    pub async fn list_my_chats(
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
        self.get("/api/v1/me/chats", &query).await
    }

    pub async fn get_my_chat(&self, chat_id: &str) -> ApiResult<ApiResponse<Chat>> {
        self.get(&format!("/api/v1/me/chats/{}", chat_id), &[]).await
    }

    pub async fn create_my_chat(
        &self,
        request: &CreateChatRequest,
    ) -> ApiResult<ApiResponse<Chat>> {
        self.post("/api/v1/me/chats", request).await
    }

    pub async fn list_my_chat_messages(
        &self,
        chat_id: &str,
        page: Option<u32>,
        page_size: Option<u32>,
        message_type: Option<&str>,
        since: Option<&str>,
    ) -> ApiResult<ListResponse<ChatMessage>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = page_size {
            query.push(("page_size", page_size.to_string()));
        }
        if let Some(message_type) = message_type {
            query.push(("message_type", message_type.to_string()));
        }
        if let Some(since) = since {
            query.push(("since", since.to_string()));
        }
        self.get(&format!("/api/v1/me/chats/{}/messages", chat_id), &query)
            .await
    }

    pub async fn create_my_chat_message(
        &self,
        chat_id: &str,
        request: &ChatMessageRequest,
    ) -> ApiResult<ApiResponse<ChatMessage>> {
        self.post(&format!("/api/v1/me/chats/{}/messages", chat_id), request)
            .await
    }

    pub async fn list_my_chat_participants(
        &self,
        chat_id: &str,
        participant_type: Option<&str>,
    ) -> ApiResult<ListResponse<Participant>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(participant_type) = participant_type {
            query.push(("participant_type", participant_type.to_string()));
        }
        self.get(&format!("/api/v1/me/chats/{}/participants", chat_id), &query)
            .await
    }

    pub async fn add_my_chat_participant(
        &self,
        chat_id: &str,
        request: &AddParticipantRequest,
    ) -> ApiResult<ApiResponse<Participant>> {
        self.post(&format!("/api/v1/me/chats/{}/participants", chat_id), request)
            .await
    }

    pub async fn remove_my_chat_participant(
        &self,
        chat_id: &str,
        participant_id: &str,
    ) -> ApiResult<()> {
        self.delete(&format!(
            "/api/v1/me/chats/{}/participants/{}",
            chat_id, participant_id
        ))
        .await
    }

    /// `peer_type` maps to the upstream `type` query param.
    pub async fn list_my_peers(
        &self,
        not_in_chat: Option<&str>,
        peer_type: Option<&str>,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ApiResult<ListResponse<Value>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(chat_id) = not_in_chat {
            query.push(("not_in_chat", chat_id.to_string()));
        }
        if let Some(peer_type) = peer_type {
            query.push(("type", peer_type.to_string()));
        }
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = page_size {
            query.push(("page_size", page_size.to_string()));
        }
        self.get("/api/v1/me/peers", &query).await
    }

    pub async fn list_my_agents(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ApiResult<ListResponse<AgentProfile>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = page_size {
            query.push(("page_size", page_size.to_string()));
        }
        self.get("/api/v1/me/agents", &query).await
    }

    pub async fn register_my_agent(
        &self,
        request: &RegisterAgentRequest,
    ) -> ApiResult<ApiResponse<AgentProfile>> {
        self.post("/api/v1/me/agents", request).await
    }
}
