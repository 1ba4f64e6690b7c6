//! HTTP API route definitions.

use std::time::Instant;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::auth::authorize;
use super::handlers::{create_data, root, AppState};
use crate::metrics;

/// Path of the data endpoint.
pub const DATA_PATH: &str = "/api/some-endpoint";

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route(
            DATA_PATH,
            post(create_data).route_layer(middleware::from_fn_with_state(
                state.clone(),
                authorize,
            )),
        )
        .layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Record request count and latency for every response.
async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = path_label(request.uri().path());

    let response = next.run(request).await;

    metrics::inc_http_requests(path, response.status().as_u16());
    metrics::record_http_latency(start, path);
    response
}

/// Bounded label for a request path.
fn path_label(path: &str) -> &'static str {
    match path {
        "/" => "/",
        DATA_PATH => DATA_PATH,
        _ => "other",
    }
}
