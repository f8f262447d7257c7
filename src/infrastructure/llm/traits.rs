//! Text generation interface used by the personalised tips service

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One turn sent to a chat-completions endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMMessage {
    pub role: String,
    pub content: String,
}

impl LLMMessage {
    fn with_role(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role("user", content)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    pub content: String,
    pub model: String,
    pub usage: Option<LLMUsage>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMUsage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

/// Failures talking to the model provider
#[derive(Error, Debug)]
pub enum LLMError {
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Non-success status from the provider
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Parse error: {0}")]
    ParseError(String),
}

pub type LLMResult<T> = Result<T, LLMError>;

#[async_trait]
pub trait LLM: Send + Sync {
    fn name(&self) -> &str;

    async fn chat(
        &self,
        messages: Vec<LLMMessage>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> LLMResult<LLMResponse>;
}
