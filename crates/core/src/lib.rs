//! Tutor Cascade Core
//!
//! Foundational types shared by the Tutor Cascade workspace crates.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `profile` - Learner cognitive-style snapshot and score rendering
//! - `template` - Named prompt templates with single-pass slot interpolation
//!
//! ## Design Principles
//!
//! - Zero heavy dependencies: only serde and thiserror
//! - Everything here is pure and synchronous; model calls live in `tutor-cascade-llm`

pub mod error;
pub mod profile;
pub mod template;

// ── Error types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Profile ────────────────────────────────────────────────────────────
pub use profile::{format_score, ConfidenceBand, UserProfile};

// ── Templates ──────────────────────────────────────────────────────────
pub use template::PromptTemplate;
