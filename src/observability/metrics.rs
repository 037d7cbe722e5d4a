//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Install the Prometheus exporter
//! - Record filter factory lifecycle metrics
//! - Back the `Scope` collaborator handed to filters
//!
//! # Metrics
//! - `filter_factory_created_total` (counter): accepted configurations by filter
//! - `filter_config_rejected_total` (counter): rejected configurations by filter, reason
//! - `filter_config_reloads_total` (counter): factory swaps on a listener

use std::net::SocketAddr;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::config::SchemaErrorKind;
use crate::filter::Scope;

/// Install the Prometheus recorder and HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

pub fn record_factory_created(filter: &'static str) {
    metrics::counter!("filter_factory_created_total", "filter" => filter).increment(1);
}

pub fn record_config_rejected(filter: &'static str, kind: SchemaErrorKind) {
    metrics::counter!(
        "filter_config_rejected_total",
        "filter" => filter,
        "reason" => format!("{:?}", kind)
    )
    .increment(1);
}

pub fn record_reload() {
    metrics::counter!("filter_config_reloads_total").increment(1);
}

/// `Scope` over the global `metrics` recorder.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsScope;

impl Scope for MetricsScope {
    fn increment_counter(&self, name: &str, value: u64) {
        metrics::counter!(name.to_owned()).increment(value);
    }
}
