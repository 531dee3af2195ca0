//! Application State
//!
//! Shared state handed to every HTTP handler.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tutor_cascade_llm::build_provider;

use crate::models::settings::AppConfig;
use crate::services::auth::TokenService;
use crate::services::tutor::TutorOrchestrator;
use crate::storage::{Database, ExplanationCache};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths;

/// Handle type used by the router
pub type SharedState = Arc<AppState>;

pub struct AppState {
    /// SQLite database with connection pool
    pub db: Database,
    /// Access token issuer/validator
    pub tokens: TokenService,
    /// Tutoring pipeline
    pub orchestrator: TutorOrchestrator,
    /// Subject explanation cache
    pub explanation_cache: ExplanationCache,
    /// Configuration the server was started with
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        db: Database,
        orchestrator: TutorOrchestrator,
        explanation_cache: ExplanationCache,
    ) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.access_token_expire_minutes);
        Self {
            db,
            tokens,
            orchestrator,
            explanation_cache,
            config,
        }
    }

    /// Build every service from configuration.
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let db_path = match &config.database_path {
            Some(path) => PathBuf::from(path),
            None => paths::database_path()?,
        };
        let db = Database::open(&db_path)?;
        tracing::info!("[AppState] Database opened at {}", db_path.display());

        let model = build_provider(&config.model).map_err(|e| AppError::config(e.to_string()))?;
        let orchestrator = TutorOrchestrator::new(model.clone(), model)
            .map_err(|e| AppError::internal(e.to_string()))?
            .with_stage_timeout(Duration::from_secs(config.stage_timeout_secs));

        let explanation_cache = ExplanationCache::load(&config.explanation_cache_path)?;

        Ok(Self::new(config, db, orchestrator, explanation_cache))
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(self)
    }
}
