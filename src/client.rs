//! HTTP client for the remote memory service
//!
//! Uses a long-lived reqwest::Client for connection pooling; the transport
//! timeout lives on the client, so a hung service surfaces as an ordinary
//! request error to the pipelines.

use crate::config::MemoryConfig;
use crate::error::MemoryError;
use crate::models::{AddResponse, ProfileResponse, SearchResponse, StatsResponse, TurnMessage};
use crate::Result;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::info;

/// The remote calls the recall/capture pipelines depend on.
///
/// Split out as a trait so tests can substitute a recording store.
#[async_trait::async_trait]
pub trait MemoryStore: Send + Sync {
    /// Combined search across semantic, episodic, and procedural memory.
    async fn search_all(&self, query: &str, limit: u32, graph_depth: u32)
        -> Result<SearchResponse>;

    /// Fetch the service-maintained user profile.
    async fn get_profile(&self, user_id: &str, force: bool) -> Result<ProfileResponse>;

    /// Persist a batch of transcript messages in one call.
    async fn add_messages(&self, messages: &[TurnMessage]) -> Result<AddResponse>;
}

/// Reusable memory service client (connection-pooled)
pub struct MemoryClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MemoryClient {
    pub fn new(cfg: &MemoryConfig) -> Result<Self> {
        if cfg.api_key.is_empty() {
            return Err(MemoryError::Config(
                "no API key configured, set MEMLINK_API_KEY".to_string(),
            ));
        }

        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(cfg.request_timeout)
            .build()?;

        info!("Memory service client ready for {}", cfg.base_url);

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MemoryError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        Ok(response.json::<T>().await?)
    }

    /// One-shot free-text ingestion, outside the turn pipeline.
    pub async fn add_text(&self, text: &str) -> Result<AddResponse> {
        self.post_json("/v1/add_text", &json!({ "text": text })).await
    }

    /// Store-wide counters (entities, facts, relations, embeddings).
    pub async fn get_stats(&self) -> Result<StatsResponse> {
        self.get_json("/v1/stats").await
    }
}

#[async_trait::async_trait]
impl MemoryStore for MemoryClient {
    async fn search_all(
        &self,
        query: &str,
        limit: u32,
        graph_depth: u32,
    ) -> Result<SearchResponse> {
        self.post_json(
            "/v1/search/all",
            &json!({
                "query": query,
                "limit": limit,
                "graph_depth": graph_depth,
            }),
        )
        .await
    }

    async fn get_profile(&self, user_id: &str, force: bool) -> Result<ProfileResponse> {
        let query = if force { "?force=true" } else { "" };
        self.get_json(&format!("/v1/profile/{}{}", user_id, query))
            .await
    }

    async fn add_messages(&self, messages: &[TurnMessage]) -> Result<AddResponse> {
        self.post_json("/v1/add", &json!({ "messages": messages }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageRole;

    #[test]
    fn test_client_requires_api_key() {
        let cfg = MemoryConfig::default();
        let result = MemoryClient::new(&cfg);
        assert!(matches!(result, Err(MemoryError::Config(_))));
    }

    #[test]
    fn test_search_request_body_serialization() {
        let body = json!({
            "query": "what does Alice like?",
            "limit": 5,
            "graph_depth": 2,
        });
        let encoded = serde_json::to_string(&body).unwrap();
        assert!(encoded.contains("\"graph_depth\":2"));
        assert!(encoded.contains("what does Alice like?"));
    }

    #[test]
    fn test_add_request_body_serialization() {
        let messages = vec![
            TurnMessage {
                role: MessageRole::User,
                content: "remember this".to_string(),
            },
            TurnMessage {
                role: MessageRole::Assistant,
                content: "noted".to_string(),
            },
        ];
        let body = json!({ "messages": messages });
        let encoded = serde_json::to_string(&body).unwrap();
        assert!(encoded.contains("\"role\":\"user\""));
        assert!(encoded.contains("\"role\":\"assistant\""));
        assert!(encoded.contains("remember this"));
    }
}
