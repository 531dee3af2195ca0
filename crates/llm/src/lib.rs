//! Tutor Cascade LLM
//!
//! Provides a unified interface for the model endpoints the tutoring pipeline calls:
//! - Google Gemini (default, text + vision)
//! - OpenAI-compatible chat completions (text + vision)
//!
//! Also includes the HTTP client factory and a provider factory keyed by config.

pub mod gemini;
pub mod http_client;
pub mod openai;
pub mod provider;
pub mod types;

use std::sync::Arc;

// Re-export main types
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use openai::OpenAIProvider;
pub use provider::LlmProvider;
pub use types::*;

/// Build the provider selected by `config.provider`.
pub fn build_provider(config: &ProviderConfig) -> LlmResult<Arc<dyn LlmProvider>> {
    let provider: Arc<dyn LlmProvider> = match config.provider {
        ProviderType::Gemini => Arc::new(GeminiProvider::new(config.clone())?),
        ProviderType::OpenAI => Arc::new(OpenAIProvider::new(config.clone())?),
    };
    tracing::info!(
        "[LLM] Using provider {} with model {}",
        provider.name(),
        provider.model()
    );
    Ok(provider)
}
