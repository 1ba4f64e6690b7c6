//! Prometheus metrics for request and client monitoring.
//!
//! This module provides metrics for:
//! - HTTP request counts and latency per route
//! - Authorization rejections
//! - Client fetch failures

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{debug, info};

use crate::error::AppError;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Authorization rejections counter metric name.
pub const METRIC_AUTH_REJECTIONS: &str = "auth_rejections_total";
/// Client fetch failures counter metric name.
pub const METRIC_CLIENT_FETCH_FAILURES: &str = "client_fetch_failures_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests served");
    describe_counter!(
        METRIC_AUTH_REJECTIONS,
        "Total number of requests rejected by the authorization policy"
    );
    describe_counter!(
        METRIC_CLIENT_FETCH_FAILURES,
        "Total number of failed client fetches"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus exporter on its own listener.
pub fn install_exporter(addr: SocketAddr) -> Result<(), AppError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| AppError::Metrics(e.to_string()))?;

    info!("Prometheus exporter listening on {}", addr);
    Ok(())
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, path: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "path" => path).record(latency_ms);
}

/// Increment HTTP requests counter.
pub fn inc_http_requests(path: &'static str, status: u16) {
    counter!(METRIC_HTTP_REQUESTS, "path" => path, "status" => status.to_string()).increment(1);
}

/// Increment authorization rejections counter.
pub fn inc_auth_rejections() {
    counter!(METRIC_AUTH_REJECTIONS).increment(1);
}

/// Increment client fetch failures counter.
pub fn inc_client_fetch_failures() {
    counter!(METRIC_CLIENT_FETCH_FAILURES).increment(1);
}
