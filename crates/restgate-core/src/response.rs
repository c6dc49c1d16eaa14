//! Response shaping.
//!
//! Every rejection produced by the pipeline uses the same body contract:
//! a compact JSON object with exactly `message` and `status`, followed by a
//! single newline, served as `application/json; charset=UTF-8`.
//!
//! ```text
//! {"message":"auth_missing_token","status":false}\n
//! ```
//!
//! The `{message}` shape ([`MessageBody`]) is reserved for informational
//! endpoints such as `/version`.

use axum::{
    body::Body,
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// `{status, message}` body used by every rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBody {
    pub message: String,
    pub status: bool,
}

impl StatusBody {
    pub fn new(status: bool, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

/// `{message}` body used by informational endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Serialize `body` as compact JSON plus a trailing newline with the given
/// status code.
pub fn json_response<T: Serialize>(body: &T, status: StatusCode) -> Response {
    let mut bytes = match serde_json::to_vec(body) {
        Ok(bytes) => bytes,
        Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };
    bytes.push(b'\n');

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    response
}

/// Shape a `{status, message}` response.
pub fn status_response(body: StatusBody, status: StatusCode) -> Response {
    json_response(&body, status)
}

/// Shape a `{message}` response.
pub fn message_response(message: impl Into<String>, status: StatusCode) -> Response {
    json_response(
        &MessageBody {
            message: message.into(),
        },
        status,
    )
}
