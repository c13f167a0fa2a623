//! Metrics collection and exposition.
//!
//! # Metrics
//! - `startup_candidates_total` (counter): components seen during registration, by `eager`
//! - `startup_components_initialized_total` (counter): eager components built by the sweep
//! - `startup_component_failures_total` (counter): eager components that failed, by component
//! - `startup_component_init_seconds` (histogram): construction time, by component
//! - `startup_sweep_duration_seconds` (histogram): wall time of the whole sweep
//! - `startup_eager_components` (gauge): outcome of the last sweep, by `state`
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade and is a no-op without a recorder
//! - The CLI installs an in-process Prometheus recorder and renders it on demand

use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::component::ComponentId;

/// Install the Prometheus recorder as the global metrics recorder.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    tracing::debug!("Metrics recorder installed");
    Ok(handle)
}

pub fn record_candidate(eager: bool) {
    let label = if eager { "true" } else { "false" };
    metrics::counter!("startup_candidates_total", "eager" => label).increment(1);
}

pub fn record_initialized(component: &ComponentId, elapsed: Duration) {
    metrics::counter!("startup_components_initialized_total").increment(1);
    metrics::histogram!("startup_component_init_seconds", "component" => component.to_string())
        .record(elapsed.as_secs_f64());
}

pub fn record_failure(component: &ComponentId) {
    metrics::counter!("startup_component_failures_total", "component" => component.to_string())
        .increment(1);
}

pub fn record_sweep(elapsed: Duration, initialized: usize, failed: usize) {
    metrics::histogram!("startup_sweep_duration_seconds").record(elapsed.as_secs_f64());
    metrics::gauge!("startup_eager_components", "state" => "initialized").set(initialized as f64);
    metrics::gauge!("startup_eager_components", "state" => "failed").set(failed as f64);
}
