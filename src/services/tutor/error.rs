//! Tutor Pipeline Errors
//!
//! Image and vision failures are recoverable: the turn continues on the text
//! path. Every other model failure ends the turn and reaches the caller wrapped
//! in a single `ChatResponse` error.

use std::time::Duration;

use thiserror::Error;
use tutor_cascade_core::CoreError;
use tutor_cascade_llm::LlmError;

/// Pipeline stages that call a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Coding,
    Vision,
    Planning,
    Analysis,
    Synthesis,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Coding => "coding",
            Stage::Vision => "vision",
            Stage::Planning => "planning",
            Stage::Analysis => "analysis",
            Stage::Synthesis => "synthesis",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum TutorError {
    /// Uploaded bytes could not be decoded or re-encoded
    #[error("Failed to process image: {0}")]
    ImageProcessing(String),

    /// The multimodal call failed or timed out
    #[error("Failed to get vision response: {0}")]
    VisionRequest(String),

    /// A text-generation stage failed
    #[error("{stage} stage failed: {source}")]
    ModelRequest {
        stage: Stage,
        #[source]
        source: LlmError,
    },

    /// A text-generation stage exceeded its time budget
    #[error("{stage} stage timed out after {timeout:?}")]
    ModelTimeout { stage: Stage, timeout: Duration },

    /// A prompt template could not be rendered
    #[error("Prompt error: {0}")]
    Template(#[from] CoreError),

    /// The single error surfaced to callers of a failed turn
    #[error("Failed to get chat response: {0}")]
    ChatResponse(Box<TutorError>),
}

impl TutorError {
    /// Whether the orchestrator may continue the turn after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TutorError::ImageProcessing(_) | TutorError::VisionRequest(_)
        )
    }

    /// Short machine-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TutorError::ImageProcessing(_) => "image_processing",
            TutorError::VisionRequest(_) => "vision_request",
            TutorError::ModelRequest { .. } => "model_request",
            TutorError::ModelTimeout { .. } => "model_timeout",
            TutorError::Template(_) => "template",
            TutorError::ChatResponse(_) => "chat_response",
        }
    }

    /// The underlying cause of a wrapped error.
    pub fn root(&self) -> &TutorError {
        match self {
            TutorError::ChatResponse(inner) => inner.root(),
            other => other,
        }
    }
}
