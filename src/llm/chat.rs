//! HTTP client for the chat-completion upstream.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One message in a chat-completion conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// Build a system message.
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    /// Build a user message.
    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// Parameters for a single completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

/// The seam between route handlers and the model upstream.
///
/// Handlers depend on this trait rather than a concrete client, so tests can
/// script completions without a network.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run one completion and return the raw assistant text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Client for an OpenAI-compatible chat-completion endpoint.
pub struct ChatClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

/// Request payload for the completion endpoint.
#[derive(Debug, Serialize)]
struct ChatCompletionPayload<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

/// Response from the completion endpoint.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl ChatClient {
    /// Create a new client.
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Self::build_http_client(crate::DEFAULT_REQUEST_TIMEOUT_SECS),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(String::from),
        }
    }

    /// Set the upstream request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.client = Self::build_http_client(secs);
        self
    }

    fn build_http_client(timeout_secs: u64) -> Client {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client")
    }
}

#[async_trait]
impl CompletionBackend for ChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending completion request"
        );

        let payload = ChatCompletionPayload {
            model: &request.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
        };

        let mut call = self.client.post(&url).json(&payload);
        if let Some(key) = &self.api_key {
            call = call.bearer_auth(key);
        }

        let response = call.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Completion upstream returned {}: {}",
                status,
                text
            ));
        }

        let result: ChatCompletionResponse = response.json().await?;
        let content = result
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        info!(chars = content.len(), "Received completion");
        Ok(content)
    }
}
