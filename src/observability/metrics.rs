//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mock_lookups_total` (counter): lookups by outcome
//!   (`served`, `no_match`, `lookup_error`, `read_error`, `parse_error`)
//! - `mock_lookup_duration_seconds` (histogram): time spent resolving and reading

use std::net::SocketAddr;
use std::time::Instant;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one lookup and how long it took.
pub fn record_lookup(outcome: &'static str, start: Instant) {
    metrics::counter!("mock_lookups_total", "outcome" => outcome).increment(1);
    metrics::histogram!("mock_lookup_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
