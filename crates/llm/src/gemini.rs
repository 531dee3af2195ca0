//! Gemini Provider
//!
//! Implementation of the LlmProvider trait for Google's Generative Language API
//! (`models/{model}:generateContent`). Gemini models are natively multimodal, so
//! the same provider serves both the text stages and the vision step.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use super::provider::{missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{
    LlmError, LlmRequestOptions, LlmResponse, LlmResult, Message, MessageContent, MessageRole,
    ProviderConfig, StopReason, UsageStats,
};
use crate::http_client::build_http_client;

/// Default Generative Language API endpoint
const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/";

/// API version segment
const GEMINI_API_VERSION: &str = "v1beta";

/// Gemini provider
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given configuration
    pub fn new(config: ProviderConfig) -> LlmResult<Self> {
        let client = build_http_client(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self { config, client })
    }

    /// Build the `generateContent` endpoint for the configured model.
    fn endpoint(&self, api_key: &str) -> LlmResult<Url> {
        let raw_base = self.config.base_url.as_deref().unwrap_or(GEMINI_API_URL);
        let mut base = Url::parse(raw_base).map_err(|e| LlmError::InvalidRequest {
            message: format!("invalid Gemini base URL '{}': {}", raw_base, e),
        })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let joined = format!(
            "{}/models/{}:generateContent",
            GEMINI_API_VERSION, self.config.model
        );
        let mut url = base.join(&joined).map_err(|e| LlmError::InvalidRequest {
            message: format!("failed to build Gemini endpoint: {}", e),
        })?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }

    /// Build the request body for the API
    fn build_request_body(
        &self,
        messages: &[Message],
        system: Option<&str>,
        request_options: &LlmRequestOptions,
    ) -> GenerateContentRequest {
        let mut system_parts: Vec<String> = system.map(|s| vec![s.to_string()]).unwrap_or_default();
        let mut contents = Vec::new();

        for msg in messages {
            if msg.role == MessageRole::System {
                system_parts.push(msg.text_content());
                continue;
            }
            let role = match msg.role {
                MessageRole::Assistant => "model",
                _ => "user",
            };
            let parts = msg
                .content
                .iter()
                .map(|c| match c {
                    MessageContent::Text { text } => ContentPart {
                        text: Some(text.clone()),
                        inline_data: None,
                    },
                    MessageContent::Image { media_type, data } => ContentPart {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: media_type.clone(),
                            data: data.clone(),
                        }),
                    },
                })
                .collect();
            contents.push(GenerateContent {
                role: Some(role.to_string()),
                parts,
            });
        }

        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(GenerateContent {
                role: None,
                parts: vec![ContentPart {
                    text: Some(system_parts.join("\n")),
                    inline_data: None,
                }],
            })
        };

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                temperature: request_options
                    .temperature_override
                    .unwrap_or(self.config.temperature),
                max_output_tokens: request_options
                    .max_tokens_override
                    .unwrap_or(self.config.max_tokens),
            },
        }
    }

    /// Parse a response from the Gemini API
    fn parse_response(&self, response: GenerateContentResponse) -> LlmResult<LlmResponse> {
        let usage = response
            .usage_metadata
            .map(|u| UsageStats {
                input_tokens: u.prompt_token_count.unwrap_or(0),
                output_tokens: u.candidates_token_count.unwrap_or(0),
            })
            .unwrap_or_default();

        let candidate = match response.candidates.into_iter().next() {
            Some(candidate) => candidate,
            None => {
                let reason = response
                    .prompt_feedback
                    .and_then(|f| f.block_reason)
                    .unwrap_or_else(|| "no candidates returned".to_string());
                return Err(LlmError::ContentBlocked { message: reason });
            }
        };

        let text: String = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let stop_reason = candidate
            .finish_reason
            .as_deref()
            .map(StopReason::from)
            .unwrap_or(StopReason::EndTurn);

        Ok(LlmResponse {
            content: if text.is_empty() { None } else { Some(text) },
            stop_reason,
            usage,
            model: response
                .model_version
                .unwrap_or_else(|| self.config.model.clone()),
        })
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn supports_multimodal(&self) -> bool {
        true
    }

    async fn send_message(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("gemini"))?;

        let url = self.endpoint(api_key)?;
        let body = self.build_request_body(&messages, system.as_deref(), &request_options);

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "gemini"));
        }

        let gemini_response: GenerateContentResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        self.parse_response(gemini_response)
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

// Gemini wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GenerateContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GenerateContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GenerateContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    prompt_feedback: Option<PromptFeedback>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}
