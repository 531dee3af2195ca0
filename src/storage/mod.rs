//! Storage Layer
//!
//! Handles all data persistence: SQLite database, JSON config and the
//! explanation cache file.

pub mod config;
pub mod database;
pub mod explanation_cache;

pub use config::*;
pub use database::*;
pub use explanation_cache::*;
