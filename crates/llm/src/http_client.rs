//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients for provider calls.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use crate::types::{LlmError, LlmResult};

/// Build a `reqwest::Client` with a JSON content type and request timeout.
pub fn build_http_client(timeout: Duration) -> LlmResult<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::NetworkError {
            message: format!("failed to build HTTP client: {}", e),
        })
}
