//! LLM Configuration

use serde::{Deserialize, Serialize};

/// LLM Provider type. Both speak the OpenAI chat completions API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMProvider {
    #[default]
    OpenAI,
    Groq,
}

impl LLMProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "openai",
            LLMProvider::Groq => "groq",
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "https://api.openai.com/v1",
            LLMProvider::Groq => "https://api.groq.com/openai/v1",
        }
    }
}

/// LLM Configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LLMConfig {
    pub provider: LLMProvider,

    pub openai_api_key: Option<String>,
    pub groq_api_key: Option<String>,

    pub openai_model: Option<String>,
    pub groq_model: Option<String>,

    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::OpenAI,
            openai_api_key: None,
            groq_api_key: None,
            openai_model: Some("gpt-4o".to_string()),
            groq_model: Some("llama-3.1-8b-instant".to_string()),
            temperature: 0.7,
            max_tokens: Some(1000),
        }
    }
}

impl LLMConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override keys and temperature from the environment
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.openai_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            self.groq_api_key = Some(key);
            // Fall back to Groq when only its key is available
            if self.openai_api_key.is_none() {
                self.provider = LLMProvider::Groq;
            }
        }
        if let Ok(temp) = std::env::var("LLM_TEMPERATURE") {
            if let Ok(t) = temp.parse() {
                self.temperature = t;
            }
        }
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider: LLMProvider) -> Option<&str> {
        let key = match provider {
            LLMProvider::OpenAI => self.openai_api_key.as_deref(),
            LLMProvider::Groq => self.groq_api_key.as_deref(),
        };
        key.filter(|k| !k.is_empty())
    }

    /// Get model for a provider
    pub fn model(&self, provider: LLMProvider) -> &str {
        match provider {
            LLMProvider::OpenAI => self.openai_model.as_deref().unwrap_or("gpt-4o"),
            LLMProvider::Groq => self.groq_model.as_deref().unwrap_or("llama-3.1-8b-instant"),
        }
    }
}
