//! CORS prelude.
//!
//! Sets the same three `Access-Control-Allow-*` headers on every response,
//! including rejections, redirects and `OPTIONS` preflights. There is no
//! origin negotiation: the configured values are sent as-is.

use axum::{
    Router,
    http::{
        HeaderValue,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, InvalidHeaderValue,
        },
    },
};
use restgate_config::CorsConfig;
use restgate_config::cors::{DEFAULT_ALLOW_HEADERS, DEFAULT_ALLOW_METHODS, DEFAULT_ALLOW_ORIGIN};
use tower_http::set_header::SetResponseHeaderLayer;

/// Validated header values built from a [`CorsConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
    allow_headers: HeaderValue,
    allow_methods: HeaderValue,
}

impl CorsHeaders {
    pub fn from_config(config: &CorsConfig) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            allow_origin: HeaderValue::from_str(&config.allow_origin)?,
            allow_headers: HeaderValue::from_str(&config.allow_headers)?,
            allow_methods: HeaderValue::from_str(&config.allow_methods)?,
        })
    }
}

impl Default for CorsHeaders {
    fn default() -> Self {
        Self {
            allow_origin: HeaderValue::from_static(DEFAULT_ALLOW_ORIGIN),
            allow_headers: HeaderValue::from_static(DEFAULT_ALLOW_HEADERS),
            allow_methods: HeaderValue::from_static(DEFAULT_ALLOW_METHODS),
        }
    }
}

/// Wrap `router` so every response carries the CORS headers. Values set by
/// inner layers or handlers are overridden.
pub fn cors_prelude<S>(router: Router<S>, headers: &CorsHeaders) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            headers.allow_origin.clone(),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            headers.allow_headers.clone(),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            headers.allow_methods.clone(),
        ))
}
