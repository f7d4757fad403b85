//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define site metrics (requests, latency, bookings, storage failures)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `little_lemon_requests_total` (counter): requests by method, route, status
//! - `little_lemon_request_duration_seconds` (histogram): latency by route
//! - `little_lemon_bookings_created_total` (counter)
//! - `little_lemon_storage_errors_total` (counter): failures by operation
//!
//! # Design Decisions
//! - Labels use the matched route template, never the raw path
//! - Recording is a no-op until `init_metrics` installs the exporter

use std::net::SocketAddr;
use std::time::Instant;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "little_lemon_requests_total";
pub const REQUEST_DURATION: &str = "little_lemon_request_duration_seconds";
pub const BOOKINGS_CREATED: &str = "little_lemon_bookings_created_total";
pub const STORAGE_ERRORS: &str = "little_lemon_storage_errors_total";

/// Install the Prometheus recorder and its HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_counter!(REQUESTS_TOTAL, Unit::Count, "HTTP requests handled");
    describe_histogram!(REQUEST_DURATION, Unit::Seconds, "HTTP request latency");
    describe_counter!(BOOKINGS_CREATED, Unit::Count, "Bookings stored");
    describe_counter!(STORAGE_ERRORS, Unit::Count, "Failed store operations");

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    counter!(
        REQUESTS_TOTAL,
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(REQUEST_DURATION, "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_booking_created() {
    counter!(BOOKINGS_CREATED).increment(1);
}

pub fn record_storage_error(operation: &'static str) {
    counter!(STORAGE_ERRORS, "operation" => operation).increment(1);
}

/// Route-layer middleware timing every matched request.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}
