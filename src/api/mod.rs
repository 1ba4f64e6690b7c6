//! HTTP API module: greeting and data endpoints.

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{parse_bearer, AuthPolicy};
pub use handlers::{AppState, DATA_CREATED, GREETING};
pub use routes::{create_router, DATA_PATH};
