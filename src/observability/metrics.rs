//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rewriter_decisions_total` (counter): decisions by kind
//! - `rewriter_decision_duration_seconds` (histogram): time to decide, lookups included
//! - `rewriter_index_fetch_total` (counter): index lookups by scope and outcome
//! - `rewriter_emulator_requests_total` (counter): emulator responses by status
//!
//! # Design Decisions
//! - Without an installed recorder (Lambda) every call is a no-op
//! - Prometheus endpoint only for the local emulator

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_decision(kind: &'static str, start: Instant) {
    counter!("rewriter_decisions_total", "decision" => kind).increment(1);
    histogram!("rewriter_decision_duration_seconds", "decision" => kind)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_index_fetch(scope: &'static str, outcome: &'static str) {
    counter!("rewriter_index_fetch_total", "scope" => scope, "outcome" => outcome).increment(1);
}

pub fn record_emulator_response(status: u16) {
    counter!("rewriter_emulator_requests_total", "status" => status.to_string()).increment(1);
}
