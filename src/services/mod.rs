//! Services
//!
//! Business logic called by the HTTP routes.

pub mod auth;
pub mod subjects;
pub mod tutor;

pub use auth::{AuthError, TokenService};
pub use subjects::SubjectCatalog;
pub use tutor::{ChatTurn, TurnOutcome, TutorError, TutorOrchestrator};
