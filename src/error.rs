//! Unified error types for the API server and client.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Unified error type for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Client fetch error.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Metrics exporter could not be installed.
    #[error("metrics error: {0}")]
    Metrics(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while the client fetches from the API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Base URL could not be parsed.
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Parse failure.
        source: url::ParseError,
    },

    /// Transport-level failure (connect, timeout, body read).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status {
        /// Status returned by the server.
        status: reqwest::StatusCode,
        /// URL that was fetched.
        url: String,
    },
}

/// Reasons the authorization step refuses a request.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No `Authorization` header was sent.
    #[error("missing authorization header")]
    MissingHeader,

    /// Header was not valid `Bearer <token>`.
    #[error("malformed authorization header")]
    MalformedHeader,

    /// Token did not match the configured secret.
    #[error("invalid bearer token")]
    InvalidToken,
}

/// Errors surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authorization failed.
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(_) => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                "Unauthorized",
            )
                .into_response(),
        }
    }
}
