//! Restgate Observability
//!
//! - [`logging`]: subscriber setup ([`init_tracing`]) and the per-request
//!   [`logging_middleware`]
//! - `metrics` (feature `metrics`, on by default): admission counters and a
//!   Prometheus recorder; without the feature the same functions are no-ops
//!
//! Libraries in the workspace only emit `tracing` events. Installing a
//! subscriber or recorder is left to the binary.
//!
//! ```no_run
//! use restgate_observability::{LoggingConfig, init_tracing};
//!
//! init_tracing(&LoggingConfig::from_env()).expect("tracing already initialized");
//! ```

pub mod logging;
#[cfg(feature = "metrics")]
pub mod metrics;

pub use logging::{LoggingConfig, init_tracing, logging_middleware};

#[cfg(feature = "metrics")]
pub use self::metrics::{PrometheusHandle, init_metrics, track_admission};

#[cfg(not(feature = "metrics"))]
pub mod stubs {
    /// No-op when the `metrics` feature is disabled
    pub fn init_metrics() -> Option<()> {
        None
    }

    /// No-op when the `metrics` feature is disabled
    pub fn track_admission(_outcome: &'static str) {}
}

#[cfg(not(feature = "metrics"))]
pub use stubs::*;
