//! Client module: the one-shot page that shows the API greeting.
//!
//! This module handles:
//! - HTTP client for the greeting route
//! - Page view with its message state and rendering

pub mod http;
pub mod view;

pub use http::ApiClient;
pub use view::{MessageView, ViewState};
