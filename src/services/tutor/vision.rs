//! Vision Responder
//!
//! Sends a preprocessed image together with the learner's query to the
//! multimodal model and returns its description.

use std::sync::Arc;
use std::time::Duration;

use tutor_cascade_llm::LlmProvider;

use super::error::TutorError;
use super::image::EncodedImage;

pub struct VisionResponder {
    model: Arc<dyn LlmProvider>,
    timeout: Duration,
}

impl VisionResponder {
    pub fn new(model: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Describe `image` in the context of `query`.
    ///
    /// Transport, model and timeout failures all surface as `VisionRequest`.
    pub async fn describe(&self, image: &EncodedImage, query: &str) -> Result<String, TutorError> {
        let call = self
            .model
            .generate_with_image(image.media_type, &image.data, query);

        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(TutorError::VisionRequest(e.to_string())),
            Err(_) => Err(TutorError::VisionRequest(format!(
                "timed out after {:?}",
                self.timeout
            ))),
        }
    }
}
