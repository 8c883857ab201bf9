//! Service configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_LLM_BASE_URL, DEFAULT_MAX_COMPLETION_TOKENS, DEFAULT_MODEL,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Global service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the chat-completion upstream
    pub llm_base_url: String,

    /// API key for the upstream; requests go out unauthenticated when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_api_key: Option<String>,

    /// Default model used for app generation
    pub model: String,

    /// Completion token budget per generation
    pub max_completion_tokens: u32,

    /// Upstream request timeout in seconds
    pub request_timeout_secs: u64,

    /// Accepted bearer tokens; an empty set disables the auth check
    pub api_tokens: HashSet<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            llm_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_completion_tokens: DEFAULT_MAX_COMPLETION_TOKENS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            api_tokens: HashSet::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            llm_base_url: std::env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string()),
            llm_api_key: std::env::var("LLM_API_KEY").ok(),
            model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            max_completion_tokens: std::env::var("MAX_COMPLETION_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_COMPLETION_TOKENS),
            request_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            api_tokens: std::env::var("API_TOKENS")
                .map(|raw| Self::parse_tokens(&raw))
                .unwrap_or_default(),
        }
    }

    /// Parse a comma-separated token list, ignoring empty segments.
    pub fn parse_tokens(raw: &str) -> HashSet<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }
}
