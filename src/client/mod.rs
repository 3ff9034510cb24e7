//! Typed client for the Thenvoi platform REST API.
//!
//! Every call is a single attempt: failures surface immediately and are
//! never retried here. Timeouts are whatever the transport defaults to.

pub mod agent_api;
pub mod platform_api;
pub mod types;
pub mod user_api;

use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Failures surfaced by the REST client.
///
/// Caller mistakes (bad parameters, malformed JSON) are rejected before a
/// request is built and never reach this type.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API error {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

pub struct RestClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl RestClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Both an API key and a base URL are present. Says nothing about
    /// whether the key is valid.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.base_url.is_empty()
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> ApiResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("[RestClient] {} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("[RestClient] API returned error status {}: {}", status, body);
            return Err(ApiError::Status { status, body });
        }

        Ok(response)
    }

    pub(crate) async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send::<()>(Method::GET, path, query, None).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, &[], Some(body)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_empty<T>(&self, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send::<()>(Method::POST, path, &[], None).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self.send(Method::PATCH, path, &[], Some(body)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send::<()>(Method::DELETE, path, &[], None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::types::{Chat, ListResponse};
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_sends_bearer_auth() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/agent/chats"))
            .and(header("Authorization", "Bearer thnv_a_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "c1"}]
            })))
            .mount(&mock_server)
            .await;

        let client = RestClient::new("thnv_a_test", mock_server.uri());
        let result: ListResponse<Chat> = client.get("/api/v1/agent/chats", &[]).await.unwrap();
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].id, "c1");
    }

    #[tokio::test]
    async fn test_query_params_are_forwarded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/agent/chats"))
            .and(query_param("page", "2"))
            .and(query_param("page_size", "10"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})),
            )
            .mount(&mock_server)
            .await;

        let client = RestClient::new("thnv_a_test", mock_server.uri());
        let query = vec![("page", "2".to_string()), ("page_size", "10".to_string())];
        let result: ListResponse<Chat> = client.get("/api/v1/agent/chats", &query).await.unwrap();
        assert!(result.data.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_carries_body_verbatim() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/agent/chats/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("chat room not found"))
            .mount(&mock_server)
            .await;

        let client = RestClient::new("thnv_a_test", mock_server.uri());
        let result: ApiResult<ListResponse<Chat>> =
            client.get("/api/v1/agent/chats/missing", &[]).await;

        let err = result.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("chat room not found"));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = RestClient::new("k", "http://localhost:9000/");
        assert_eq!(client.base_url(), "http://localhost:9000");
    }
}
