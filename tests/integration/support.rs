//! Shared test doubles.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tutor_cascade_llm::{
    LlmError, LlmProvider, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig,
};

/// One model call as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub had_image: bool,
}

/// Model double that replays scripted replies and records every call.
pub struct RecordingModel {
    config: ProviderConfig,
    replies: Mutex<VecDeque<LlmResult<String>>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
}

impl RecordingModel {
    pub fn new(replies: Vec<LlmResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            config: ProviderConfig::default(),
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        })
    }

    pub fn replying(texts: &[&str]) -> Arc<Self> {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    /// A model that never answers within `delay`.
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            config: ProviderConfig::default(),
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            delay: Some(delay),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.prompt).collect()
    }
}

#[async_trait]
impl LlmProvider for RecordingModel {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn model(&self) -> &str {
        "recording-1"
    }

    fn supports_multimodal(&self) -> bool {
        true
    }

    async fn send_message(
        &self,
        messages: Vec<Message>,
        _system: Option<String>,
        _request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        let call = RecordedCall {
            prompt: messages
                .iter()
                .map(|m| m.text_content())
                .collect::<Vec<_>>()
                .join("\n"),
            had_image: messages.iter().any(|m| m.has_images()),
        };
        self.calls.lock().unwrap().push(call);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::Other {
                    message: "no scripted reply left".to_string(),
                })
            })?;
        Ok(LlmResponse::from_text(reply, "recording-1"))
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

pub fn server_error(message: &str) -> LlmError {
    LlmError::ServerError {
        message: message.to_string(),
        status: Some(500),
    }
}

/// A small opaque PNG.
pub fn png_bytes() -> Vec<u8> {
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    let img = RgbImage::from_fn(4, 4, |x, y| Rgb([(x * 60) as u8, (y * 60) as u8, 200]));
    let mut out = std::io::Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}
