//! Core Error Types
//!
//! Foundational error types shared across the Tutor Cascade workspace.
//! Kept dependency-free (only thiserror + std) so the core crate stays light.
//!
//! The application crate layers storage, auth and HTTP errors on top of these.

use thiserror::Error;

/// Core error type for the Tutor Cascade workspace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A template referenced a slot that was not supplied
    #[error("Template '{template}' is missing a value for slot '{slot}'")]
    MissingSlot { template: String, slot: String },

    /// A template body is malformed (unbalanced braces, empty slot name)
    #[error("Malformed template '{template}': {message}")]
    MalformedTemplate { template: String, message: String },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Parse errors
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a missing-slot error
    pub fn missing_slot(template: impl Into<String>, slot: impl Into<String>) -> Self {
        Self::MissingSlot {
            template: template.into(),
            slot: slot.into(),
        }
    }

    /// Create a malformed-template error
    pub fn malformed(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedTemplate {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// Convert CoreError to a string
impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}
