//! Tutor Orchestrator
//!
//! Runs one chat turn through the agent cascade:
//!
//! ```text
//! classify ─┬─ coding ──► coding agent ──────────────────────────────► reply
//!           └─ general ─► [vision] ─► planning ─► analysis ─► synthesis ─► reply
//! ```
//!
//! Stages run strictly in sequence; each consumes the previous stage's text.
//! Vision is best effort. Any other failure aborts the turn and is returned as
//! a single `TutorError::ChatResponse`. The orchestrator holds no per-turn
//! state, so one instance serves concurrent turns.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tutor_cascade_core::UserProfile;
use tutor_cascade_llm::LlmProvider;

use super::agents::AgentRunner;
use super::classifier::{QueryCategory, QueryClassifier};
use super::error::TutorError;
use super::image::preprocess_image;
use super::style::StyleGuidance;
use super::templates::{AgentRole, TemplateRegistry};
use super::vision::VisionResponder;

/// Per-stage time budget when none is configured.
pub const DEFAULT_STAGE_TIMEOUT: Duration = Duration::from_secs(60);

/// Input of a single turn.
#[derive(Debug, Clone, Default)]
pub struct ChatTurn {
    pub query: String,
    /// Raw uploaded image bytes, any common format
    pub image: Option<Vec<u8>>,
    pub profile: Option<UserProfile>,
}

impl ChatTurn {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_profile(mut self, profile: Option<UserProfile>) -> Self {
        self.profile = profile;
        self
    }
}

/// Result of a completed turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Learner-facing answer
    pub response: String,
    pub branch: QueryCategory,
    /// Planning agent report (general branch only)
    pub planning_output: Option<String>,
    /// Analysis agent report (general branch only)
    pub final_analysis: Option<String>,
    /// Vision description, when an image was analyzed successfully
    pub vision_analysis: Option<String>,
}

pub struct TutorOrchestrator {
    classifier: QueryClassifier,
    agents: AgentRunner,
    vision: VisionResponder,
}

impl TutorOrchestrator {
    /// Orchestrator over the built-in templates and the default stage timeout.
    pub fn new(
        text_model: Arc<dyn LlmProvider>,
        vision_model: Arc<dyn LlmProvider>,
    ) -> Result<Self, TutorError> {
        let templates = TemplateRegistry::builtin()?;
        Ok(Self {
            classifier: QueryClassifier::new(),
            agents: AgentRunner::new(text_model, templates, DEFAULT_STAGE_TIMEOUT),
            vision: VisionResponder::new(vision_model, DEFAULT_STAGE_TIMEOUT),
        })
    }

    /// Time budget applied to every model call, vision included.
    pub fn with_stage_timeout(mut self, timeout: Duration) -> Self {
        self.agents = self.agents.with_timeout(timeout);
        self.vision = self.vision.with_timeout(timeout);
        self
    }

    pub fn with_templates(mut self, templates: TemplateRegistry) -> Self {
        self.agents = self.agents.with_templates(templates);
        self
    }

    pub fn with_classifier(mut self, classifier: QueryClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn stage_timeout(&self) -> Duration {
        self.agents.timeout()
    }

    /// Produce the tutoring response for one turn.
    pub async fn get_chat_response(&self, turn: ChatTurn) -> Result<TurnOutcome, TutorError> {
        self.run_turn(turn).await.map_err(|e| {
            tracing::error!("[Orchestrator] Turn failed ({}): {}", e.kind(), e);
            TutorError::ChatResponse(Box::new(e))
        })
    }

    async fn run_turn(&self, turn: ChatTurn) -> Result<TurnOutcome, TutorError> {
        let ChatTurn {
            query,
            image,
            profile,
        } = turn;

        let branch = self.classifier.classify(&query);
        tracing::info!("[Orchestrator] Routing query to {} branch", branch);

        if branch == QueryCategory::Coding {
            let response = self
                .agents
                .run(AgentRole::Coding, &[("user_query", query.as_str())])
                .await?;
            return Ok(TurnOutcome {
                response,
                branch,
                planning_output: None,
                final_analysis: None,
                vision_analysis: None,
            });
        }

        let mut user_query = query;
        let mut vision_analysis = None;
        if let Some(bytes) = image.filter(|b| !b.is_empty()) {
            match self.analyze_image(bytes, &user_query).await {
                Ok(description) => {
                    user_query.push_str("\n\nImage Analysis: ");
                    user_query.push_str(&description);
                    vision_analysis = Some(description);
                }
                Err(e) => {
                    tracing::warn!(
                        "[Orchestrator] Continuing without image analysis ({}): {}",
                        e.kind(),
                        e
                    );
                }
            }
        }

        let planning_output = self
            .agents
            .run(AgentRole::Planning, &[("user_query", user_query.as_str())])
            .await?;

        let final_analysis = self
            .agents
            .run(
                AgentRole::Analysis,
                &[("planning_output", planning_output.as_str()), ("user_query", user_query.as_str())],
            )
            .await?;

        let guidance = StyleGuidance::derive(profile.as_ref());
        let mut values: Vec<(&str, &str)> = guidance.slots().to_vec();
        values.push(("user_query", user_query.as_str()));
        values.push(("final_analysis", final_analysis.as_str()));
        let response = self.agents.run(AgentRole::Synthesis, &values).await?;

        Ok(TurnOutcome {
            response,
            branch,
            planning_output: Some(planning_output),
            final_analysis: Some(final_analysis),
            vision_analysis,
        })
    }

    async fn analyze_image(&self, bytes: Vec<u8>, query: &str) -> Result<String, TutorError> {
        let encoded = preprocess_image(bytes).await?;
        self.vision.describe(&encoded, query).await
    }
}
