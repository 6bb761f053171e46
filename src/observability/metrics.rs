//! Metrics collection and exposition.
//!
//! # Metrics
//! - `webhook_requests_total` (counter): total requests by method, path, status
//! - `webhook_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade and is a no-op until an
//!   exporter is installed, so the middleware always runs
//! - Path label cardinality is bounded: only the two registered routes exist,
//!   everything else records as "unmatched"

use std::net::SocketAddr;
use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed request.
pub fn record_request(method: &str, path: &str, status: u16, start_time: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    counter!("webhook_requests_total", &labels).increment(1);
    histogram!("webhook_request_duration_seconds", &labels)
        .record(start_time.elapsed().as_secs_f64());
}

/// Axum middleware feeding [`record_request`] for every request.
pub async fn track_request(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let path = match request.uri().path() {
        p @ ("/" | "/event_handler") => p.to_string(),
        _ => "unmatched".to_string(),
    };

    let response = next.run(request).await;

    record_request(&method, &path, response.status().as_u16(), start_time);
    response
}
