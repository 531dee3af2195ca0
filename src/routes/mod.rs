//! HTTP Routes
//!
//! Each module exposes a `*_routes()` router; `server::build_router` merges them.

pub mod auth;
pub mod cache;
pub mod chat;
pub mod error;
pub mod health;
pub mod profile;
pub mod subjects;

pub use auth::auth_routes;
pub use cache::cache_routes;
pub use chat::chat_routes;
pub use error::{ApiError, CurrentUser};
pub use health::health_routes;
pub use profile::profile_routes;
pub use subjects::subject_routes;
