//! Admission middleware.
//!
//! - [`cors`]: the three `Access-Control-Allow-*` headers on every response
//! - [`https`]: redirect plain-HTTP requests to `https://`
//! - [`auth`]: route resolution, token validation and authorization
//! - [`access_log`]: one line per forwarded request
//!
//! [`router::with_admission`](crate::router::with_admission) stacks them in
//! this order, outermost first: CORS, HTTPS, auth.

pub mod access_log;
pub mod auth;
pub mod cors;
pub mod https;

pub use access_log::{AccessLogEntry, AccessLogSink, TracingAccessLog};
pub use auth::{Admission, AuthState, admit, auth_middleware, decode_websocket_token, extract_token};
pub use cors::{CorsHeaders, cors_prelude};
pub use https::{https_location, https_middleware};
