//! Metrics for price lookups and scans.
//!
//! This module provides metrics for:
//! - Quote lookup latency per marketplace
//! - Quote successes and failures per marketplace
//! - Scans and detected opportunities

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::market::Marketplace;

// === Metric Name Constants ===

/// Quote lookup latency metric name.
pub const METRIC_QUOTE_LATENCY: &str = "quote_latency_ms";
/// Quotes fetched counter metric name.
pub const METRIC_QUOTES_FETCHED: &str = "quotes_fetched_total";
/// Quote failures counter metric name.
pub const METRIC_QUOTE_FAILURES: &str = "quote_failures_total";
/// Scans counter metric name.
pub const METRIC_SCANS: &str = "scans_total";
/// Opportunities detected counter metric name.
pub const METRIC_OPPORTUNITIES_DETECTED: &str = "opportunities_detected_total";

/// Initialize all metric descriptions.
/// Call this once at startup, after installing a recorder.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_QUOTE_LATENCY,
        "Marketplace quote lookup latency in milliseconds"
    );

    describe_counter!(
        METRIC_QUOTES_FETCHED,
        "Total number of quotes fetched successfully"
    );
    describe_counter!(
        METRIC_QUOTE_FAILURES,
        "Total number of failed quote lookups"
    );
    describe_counter!(METRIC_SCANS, "Total number of item scans");
    describe_counter!(
        METRIC_OPPORTUNITIES_DETECTED,
        "Total number of profitable spreads detected"
    );

    debug!("Metrics initialized");
}

/// Install an in-process Prometheus recorder whose output can be rendered on demand.
pub fn install_prometheus_recorder(
) -> Result<PrometheusHandle, metrics_exporter_prometheus::BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Record quote lookup latency.
pub fn record_quote_latency(start: Instant, marketplace: Marketplace) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_QUOTE_LATENCY, "marketplace" => marketplace.as_str()).record(latency_ms);
}

/// Increment quotes fetched counter.
pub fn inc_quotes_fetched(marketplace: Marketplace) {
    counter!(METRIC_QUOTES_FETCHED, "marketplace" => marketplace.as_str()).increment(1);
}

/// Increment quote failures counter.
pub fn inc_quote_failures(marketplace: Marketplace, kind: &'static str) {
    counter!(
        METRIC_QUOTE_FAILURES,
        "marketplace" => marketplace.as_str(),
        "kind" => kind
    )
    .increment(1);
}

/// Increment scans counter.
pub fn inc_scans() {
    counter!(METRIC_SCANS).increment(1);
}

/// Increment opportunities detected counter.
pub fn inc_opportunities_detected() {
    counter!(METRIC_OPPORTUNITIES_DETECTED).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    marketplace: Marketplace,
}

impl LatencyTimer {
    /// Create a new latency timer for a marketplace lookup.
    pub fn new(marketplace: Marketplace) -> Self {
        Self {
            start: Instant::now(),
            marketplace,
        }
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_quote_latency(self.start, self.marketplace);
    }
}
