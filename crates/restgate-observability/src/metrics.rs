//! Admission metrics.
//!
//! - `restgate_admission_total{outcome}`: one increment per request seen by
//!   the authentication middleware. `outcome` is `forwarded`, `public`,
//!   `options`, or the internal rejection reason.

pub use metrics_exporter_prometheus::PrometheusHandle;
use metrics_exporter_prometheus::PrometheusBuilder;

pub const ADMISSION_TOTAL: &str = "restgate_admission_total";

/// Install the global Prometheus recorder.
///
/// Returns `None` if a recorder is already installed, which happens when
/// several test servers start in one process.
pub fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    }
}

pub fn track_admission(outcome: &'static str) {
    ::metrics::counter!(ADMISSION_TOTAL, "outcome" => outcome).increment(1);
}
