//! Access log for admitted requests.
//!
//! The authentication middleware records one [`AccessLogEntry`] after the
//! handler returns, for every request it forwards (public routes and
//! `OPTIONS` included). The sink is injected so applications decide where
//! lines go; [`TracingAccessLog`] is the default.

use std::fmt;
use std::time::Duration;

use axum::http::{Method, Uri};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLogEntry {
    pub method: Method,
    pub uri: Uri,
    /// Empty when the request was forwarded without a matched route.
    pub route_name: String,
    pub user_id: Option<i64>,
    pub elapsed: Duration,
}

impl fmt::Display for AccessLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} userId=", self.method, self.uri, self.route_name)?;
        match self.user_id {
            Some(user_id) => write!(f, "{user_id}")?,
            None => f.write_str("<nil>")?,
        }
        write!(f, " {:?}", self.elapsed)
    }
}

/// Receives access log entries. Recording cannot fail from the caller's
/// point of view; a sink that loses an entry must not affect the response.
pub trait AccessLogSink: Send + Sync {
    fn record(&self, entry: &AccessLogEntry);
}

/// Emits each entry as an INFO event on the `restgate::access` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAccessLog;

impl AccessLogSink for TracingAccessLog {
    fn record(&self, entry: &AccessLogEntry) {
        tracing::info!(
            target: "restgate::access",
            method = %entry.method,
            uri = %entry.uri,
            route = %entry.route_name,
            user_id = ?entry.user_id,
            elapsed_ms = entry.elapsed.as_secs_f64() * 1000.0,
            "{entry}"
        );
    }
}
