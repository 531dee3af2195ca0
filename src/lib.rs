//! Tutor Cascade - Adaptive Tutoring Backend
//!
//! HTTP backend for a tutoring chat. It includes:
//! - Account signup/login with bearer tokens
//! - Learning profiles and chat history (SQLite)
//! - The multi-agent tutoring pipeline (classifier, vision, planning,
//!   analysis and profile-aware synthesis)
//! - Subject catalog and explanation cache endpoints

pub mod models;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use models::settings::{AppConfig, SettingsUpdate};
pub use server::{build_router, serve};
pub use state::{AppState, SharedState};
pub use utils::error::{AppError, AppResult};
