//! Settings Models
//!
//! Server configuration and settings data structures.

use std::net::SocketAddr;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tutor_cascade_llm::ProviderConfig;

/// Environment variable overriding the token signing secret
pub const JWT_SECRET_ENV_VAR: &str = "TUTOR_CASCADE_JWT_SECRET";

/// Environment variables consulted (in order) for the model API key
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Server configuration stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Origins allowed by CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    /// SQLite database file (defaults to ~/.tutor-cascade/tutor.db)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<String>,
    /// Subject catalog file
    #[serde(default = "default_subjects_path")]
    pub subjects_path: String,
    /// On-disk explanation cache file
    #[serde(default = "default_explanation_cache_path")]
    pub explanation_cache_path: String,
    /// HS256 signing secret for access tokens
    #[serde(default = "generate_secret")]
    pub jwt_secret: String,
    /// Access token lifetime in minutes
    #[serde(default = "default_token_minutes")]
    pub access_token_expire_minutes: i64,
    /// Upper bound on a single model call in the tutoring pipeline
    #[serde(default = "default_stage_timeout_secs")]
    pub stage_timeout_secs: u64,
    /// Largest accepted `/chat` request body, image included
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Default tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Model used by every pipeline stage
    #[serde(default)]
    pub model: ProviderConfig,
}

fn default_bind_address() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_subjects_path() -> String {
    "subjects.json".to_string()
}

fn default_explanation_cache_path() -> String {
    "subject_cache.json".to_string()
}

fn default_token_minutes() -> i64 {
    30
}

fn default_stage_timeout_secs() -> u64 {
    60
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Random 32-byte hex secret
fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            allowed_origins: default_allowed_origins(),
            database_path: None,
            subjects_path: default_subjects_path(),
            explanation_cache_path: default_explanation_cache_path(),
            jwt_secret: generate_secret(),
            access_token_expire_minutes: default_token_minutes(),
            stage_timeout_secs: default_stage_timeout_secs(),
            max_upload_bytes: default_max_upload_bytes(),
            log_level: default_log_level(),
            model: ProviderConfig::default(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub bind_address: Option<String>,
    pub allowed_origins: Option<Vec<String>>,
    pub database_path: Option<String>,
    pub jwt_secret: Option<String>,
    pub access_token_expire_minutes: Option<i64>,
    pub stage_timeout_secs: Option<u64>,
    pub max_upload_bytes: Option<usize>,
    pub model_api_key: Option<String>,
}

impl SettingsUpdate {
    /// Collect overrides from the process environment.
    ///
    /// The API key is only taken from the environment when the config file
    /// does not already carry one.
    pub fn from_env(current: &AppConfig) -> Self {
        let model_api_key = if current.model.api_key.is_none() {
            API_KEY_ENV_VARS
                .iter()
                .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        } else {
            None
        };
        Self {
            jwt_secret: std::env::var(JWT_SECRET_ENV_VAR).ok().filter(|v| !v.is_empty()),
            model_api_key,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bind_address.is_none()
            && self.allowed_origins.is_none()
            && self.database_path.is_none()
            && self.jwt_secret.is_none()
            && self.access_token_expire_minutes.is_none()
            && self.stage_timeout_secs.is_none()
            && self.max_upload_bytes.is_none()
            && self.model_api_key.is_none()
    }
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(bind_address) = update.bind_address {
            self.bind_address = bind_address;
        }
        if let Some(origins) = update.allowed_origins {
            self.allowed_origins = origins;
        }
        if let Some(path) = update.database_path {
            self.database_path = Some(path);
        }
        if let Some(secret) = update.jwt_secret {
            self.jwt_secret = secret;
        }
        if let Some(minutes) = update.access_token_expire_minutes {
            self.access_token_expire_minutes = minutes;
        }
        if let Some(secs) = update.stage_timeout_secs {
            self.stage_timeout_secs = secs;
        }
        if let Some(bytes) = update.max_upload_bytes {
            self.max_upload_bytes = bytes;
        }
        if let Some(key) = update.model_api_key {
            self.model.api_key = Some(key);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.bind_address.parse::<SocketAddr>().is_err() {
            return Err(format!("Invalid bind_address: {}", self.bind_address));
        }

        if self.jwt_secret.trim().is_empty() {
            return Err("jwt_secret cannot be empty".to_string());
        }

        if self.access_token_expire_minutes <= 0 {
            return Err("access_token_expire_minutes must be positive".to_string());
        }

        if self.stage_timeout_secs == 0 {
            return Err("stage_timeout_secs must be at least 1".to_string());
        }

        if self.max_upload_bytes == 0 {
            return Err("max_upload_bytes must be positive".to_string());
        }

        if self.model.model.trim().is_empty() {
            return Err("model.model cannot be empty".to_string());
        }

        Ok(())
    }
}
