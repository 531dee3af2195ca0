//! Tutor Pipeline
//!
//! Multi-agent tutoring cascade: query classification, optional image
//! analysis, planning, analysis and profile-aware synthesis.

pub mod agents;
pub mod classifier;
pub mod error;
pub mod image;
pub mod orchestrator;
pub mod style;
pub mod templates;
pub mod vision;

pub use agents::AgentRunner;
pub use classifier::{QueryCategory, QueryClassifier, CODING_KEYWORDS};
pub use error::{Stage, TutorError};
pub use image::{encode_for_model, preprocess_image, EncodedImage};
pub use orchestrator::{ChatTurn, TurnOutcome, TutorOrchestrator, DEFAULT_STAGE_TIMEOUT};
pub use style::{ResponseStyle, StyleGuidance};
pub use templates::{AgentRole, TemplateRegistry};
pub use vision::VisionResponder;
