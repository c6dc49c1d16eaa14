//! HTTPS enforcement behind a TLS-terminating proxy.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use restgate_config::HttpsConfig;

pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Redirect requests not forwarded over HTTPS.
///
/// When enforcement is on, a request whose `x-forwarded-proto` is not
/// exactly `https` gets `307 Temporary Redirect` to the same host and URI
/// over `https` and the inner service is not called. `OPTIONS` requests
/// always pass.
pub async fn https_middleware(
    State(config): State<HttpsConfig>,
    req: Request,
    next: Next,
) -> Response {
    if !config.enforce || req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    let forwarded_https = req
        .headers()
        .get(X_FORWARDED_PROTO)
        .is_some_and(|proto| proto == "https");
    if forwarded_https {
        return next.run(req).await;
    }

    redirect_to_https(&req)
}

/// `https://{Host}{path and query}`; falls back to the URI authority when
/// there is no `Host` header.
pub fn https_location<B>(req: &Request<B>) -> String {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| req.uri().host())
        .unwrap_or_default();
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    format!("https://{host}{path_and_query}")
}

fn redirect_to_https<B>(req: &Request<B>) -> Response {
    match HeaderValue::try_from(https_location(req)) {
        Ok(location) => (
            StatusCode::TEMPORARY_REDIRECT,
            [(header::LOCATION, location)],
        )
            .into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}
