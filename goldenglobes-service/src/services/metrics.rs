//! Metrics collection for goldenglobes-service.

use crate::services::{ConnectionState, SeedReport};
use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!("Failed to install Prometheus recorder: {}", e),
    }
}

/// Render all metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

pub fn record_seed(report: &SeedReport) {
    counter!("goldenglobes_seed_records_total", "outcome" => "inserted").increment(report.inserted);
    counter!("goldenglobes_seed_records_total", "outcome" => "failed").increment(report.failed);
    counter!("goldenglobes_seed_records_total", "outcome" => "deleted").increment(report.deleted);
}

pub fn record_store_state(state: ConnectionState) {
    gauge!("goldenglobes_store_ready").set(if state.is_ready() { 1.0 } else { 0.0 });
}
