//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod chat;
pub mod profile;
pub mod settings;
pub mod subject;
pub mod user;

pub use chat::*;
pub use profile::*;
pub use settings::*;
pub use subject::*;
pub use user::*;
