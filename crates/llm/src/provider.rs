//! LLM Provider Trait
//!
//! Defines the common interface for all LLM providers.

use async_trait::async_trait;

use super::types::{LlmError, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig};

/// Trait that all LLM providers must implement.
///
/// The tutoring pipeline only ever needs two shapes of call:
/// - a text prompt in, text out (`generate`)
/// - an image plus text in, text out (`generate_with_image`)
///
/// Both are provided on top of `send_message`, so a provider (or a test double)
/// implements exactly one network method.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Returns whether this provider supports multimodal content (images).
    fn supports_multimodal(&self) -> bool {
        false // Default: text-only
    }

    /// Send a message and get a complete response.
    ///
    /// # Arguments
    /// * `messages` - Conversation messages
    /// * `system` - Optional system prompt
    /// * `request_options` - Per-request overrides
    async fn send_message(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse>;

    /// Get the configuration for this provider.
    fn config(&self) -> &ProviderConfig;

    /// Single-prompt text generation.
    async fn generate(&self, prompt: &str) -> LlmResult<String> {
        let response = self
            .send_message(vec![Message::user(prompt)], None, LlmRequestOptions::default())
            .await?;
        Ok(response.text().to_string())
    }

    /// Joint image + text generation. `data_base64` is the encoded image payload.
    async fn generate_with_image(
        &self,
        media_type: &str,
        data_base64: &str,
        text: &str,
    ) -> LlmResult<String> {
        if !self.supports_multimodal() {
            return Err(LlmError::InvalidRequest {
                message: format!("{} model {} does not accept images", self.name(), self.model()),
            });
        }
        let message = Message::user_with_image(media_type, data_base64, text);
        let response = self
            .send_message(vec![message], None, LlmRequestOptions::default())
            .await?;
        Ok(response.text().to_string())
    }
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => LlmError::ModelNotFound {
            model: body.to_string(),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
            retry_after: None,
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
