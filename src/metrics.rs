//! Prometheus metrics for request and query monitoring.
//!
//! This module provides:
//! - HTTP request latency per route
//! - HTTP request counts per route and status
//! - Store failure counts

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Failed store queries counter metric name.
pub const METRIC_STORE_FAILURES: &str = "store_queries_failed_total";

/// Initialize all metric descriptions.
/// Call this once at startup, after the recorder is installed.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(
        METRIC_HTTP_REQUESTS,
        "Total number of HTTP requests by route and status"
    );
    describe_counter!(
        METRIC_STORE_FAILURES,
        "Total number of failed user store queries"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return its render handle.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record one finished HTTP request.
pub fn record_http_request(start: Instant, route: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "route" => route.to_string()).record(latency_ms);
    counter!(
        METRIC_HTTP_REQUESTS,
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Increment store failure counter.
pub fn inc_store_failures(kind: &'static str) {
    counter!(METRIC_STORE_FAILURES, "kind" => kind).increment(1);
}
