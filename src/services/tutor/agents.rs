//! Agent Runner
//!
//! One agent call: render the role's template, send it to the text model,
//! return the text. No retries and no inspection of the output.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tutor_cascade_llm::LlmProvider;

use super::error::TutorError;
use super::templates::{AgentRole, TemplateRegistry};

pub struct AgentRunner {
    model: Arc<dyn LlmProvider>,
    templates: TemplateRegistry,
    timeout: Duration,
}

impl AgentRunner {
    pub fn new(model: Arc<dyn LlmProvider>, templates: TemplateRegistry, timeout: Duration) -> Self {
        Self {
            model,
            templates,
            timeout,
        }
    }

    pub fn with_templates(mut self, templates: TemplateRegistry) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `role` with the given slot values.
    pub async fn run(&self, role: AgentRole, values: &[(&str, &str)]) -> Result<String, TutorError> {
        let prompt = self.templates.render(role, values)?;
        let stage = role.stage();
        let started = Instant::now();

        let text = match tokio::time::timeout(self.timeout, self.model.generate(&prompt)).await {
            Ok(Ok(text)) => text,
            Ok(Err(source)) => return Err(TutorError::ModelRequest { stage, source }),
            Err(_) => {
                return Err(TutorError::ModelTimeout {
                    stage,
                    timeout: self.timeout,
                })
            }
        };

        tracing::debug!(
            "[Agent] {} finished in {}ms ({} chars)",
            role.display_name(),
            started.elapsed().as_millis(),
            text.len()
        );
        Ok(text)
    }
}
