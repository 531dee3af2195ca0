//! Integration Tests Module
//!
//! End-to-end tests for Tutor Cascade: the tutoring pipeline against a
//! recording model, the HTTP API over an in-memory database, and the
//! password/token layer.

// Shared test doubles
mod support;

// Tutoring pipeline tests
mod pipeline_test;

// HTTP route tests
mod api_test;
