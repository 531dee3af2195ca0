//! Path Utilities
//!
//! Resolves the application data directory (~/.tutor-cascade/ by default,
//! `TUTOR_CASCADE_HOME` when set) and the files stored inside it.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Environment variable overriding the application directory
pub const HOME_ENV_VAR: &str = "TUTOR_CASCADE_HOME";

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Tutor Cascade directory (~/.tutor-cascade/)
pub fn app_dir() -> AppResult<PathBuf> {
    match std::env::var_os(HOME_ENV_VAR) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => Ok(home_dir()?.join(".tutor-cascade")),
    }
}

/// Get the config file path (~/.tutor-cascade/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(app_dir()?.join("config.json"))
}

/// Get the default database file path (~/.tutor-cascade/tutor.db)
pub fn database_path() -> AppResult<PathBuf> {
    Ok(app_dir()?.join("tutor.db"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the Tutor Cascade directory, creating if it doesn't exist
pub fn ensure_app_dir() -> AppResult<PathBuf> {
    let path = app_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
