//! Authentication
//!
//! Password hashing and bearer-token issuance/validation.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

use thiserror::Error;

/// Authentication failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown user or wrong password
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Missing, malformed, forged or expired bearer token
    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Internal error: {0}")]
    Internal(String),
}
