//! LLM integration - text generation behind a provider trait

pub mod config;
pub mod providers;
pub mod traits;


pub use config::{LLMConfig, LLMProvider};
pub use providers::ChatCompletionsProvider;
pub use traits::{LLMError, LLMMessage, LLMResponse, LLMResult, LLMUsage, LLM};

use std::sync::Arc;

/// Build the configured provider, or `None` when it has no API key
pub fn build_llm(config: &LLMConfig) -> Option<Arc<dyn LLM>> {
    let provider = config.provider;
    match config.api_key(provider) {
        Some(key) => {
            tracing::info!("LLM provider: {} ({})", provider.as_str(), config.model(provider));
            Some(Arc::new(ChatCompletionsProvider::new(
                provider.as_str(),
                provider.base_url(),
                key,
                config.model(provider),
            )))
        }
        None => {
            tracing::warn!(
                "No API key for LLM provider {}; personalised tips will use the fallback list",
                provider.as_str()
            );
            None
        }
    }
}
