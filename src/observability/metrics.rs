//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_decisions_total` (counter): gatekeeper outcomes by `outcome`
//! - `gateway_token_validation_seconds` (histogram): authority round-trip
//! - `gateway_upstream_requests_total` (counter): forwarded requests by `route`, `status`
//! - `gateway_upstream_duration_seconds` (histogram): upstream latency by `route`
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Labels never carry usernames or tokens

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_decision(outcome: &'static str) {
    metrics::counter!("gateway_decisions_total", "outcome" => outcome).increment(1);
}

pub fn record_validation(elapsed: Duration) {
    metrics::histogram!("gateway_token_validation_seconds").record(elapsed.as_secs_f64());
}

pub fn record_upstream(route: &str, status: u16, start_time: Instant) {
    let route = route.to_string();
    metrics::counter!(
        "gateway_upstream_requests_total",
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("gateway_upstream_duration_seconds", "route" => route)
        .record(start_time.elapsed().as_secs_f64());
}
