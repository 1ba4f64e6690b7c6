//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
};
use tracing::debug;

use super::auth::AuthPolicy;
use crate::config::Config;

/// Greeting returned by the root route.
pub const GREETING: &str = "Hello, World!";

/// Body returned by the data endpoint.
pub const DATA_CREATED: &str = "Data created successfully";

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Authorization policy for the data endpoint.
    pub auth: Arc<AuthPolicy>,
}

impl AppState {
    /// Create app state with the given policy.
    pub fn new(auth: AuthPolicy) -> Self {
        Self {
            auth: Arc::new(auth),
        }
    }

    /// Create app state from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(AuthPolicy::from_config(config))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AuthPolicy::Permissive)
    }
}

/// Root handler - always returns 200 with the greeting.
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, GREETING)
}

/// Data handler - accepts any body and returns 201.
///
/// The body is never read, so its size, encoding and content type cannot
/// produce a rejection.
pub async fn create_data(headers: HeaderMap) -> impl IntoResponse {
    let content_length = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());
    debug!(?content_length, "data received");
    (StatusCode::CREATED, DATA_CREATED)
}
