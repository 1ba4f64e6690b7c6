//! Minimal greeting API and the page that displays it.
//!
//! The server answers two routes:
//!
//! ```text
//! GET  /                   -> 200 "Hello, World!"
//! POST /api/some-endpoint  -> 201 "Data created successfully"
//! ```
//!
//! The data endpoint passes through an [`api::AuthPolicy`] first. The default
//! policy is permissive; with `ENFORCE_AUTH=true` it requires
//! `Authorization: Bearer $API_SECRET_KEY`.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: HTTP routes, handlers and authorization
//! - [`app`]: Server bootstrap and page loading
//! - [`client`]: Greeting client and page view
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, AppError, AuthRejection, FetchError};
