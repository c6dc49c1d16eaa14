//! Admission rejections.
//!
//! One variant per way an admission can fail. Every variant maps to
//! `403 Forbidden` with a `{status: false, message}` body; the message is the
//! only detail clients see. [`Rejection::reason`] gives a stable internal tag
//! for logs and metrics, which is how an unknown endpoint and other empty
//! message cases stay distinguishable internally.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::{StatusBody, status_response};

pub const AUTH_MISSING_TOKEN: &str = "auth_missing_token";
pub const AUTH_MALFORMED_TOKEN: &str = "auth_malformed_token";
pub const USER_NOT_ACTIVATED: &str = "user_not_activated";
pub const USER_NOT_IN_ORGANIZATION: &str = "user_not_in_organization";
pub const INSUFFICIENT_ACCESS: &str = "insufficient_access";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// No registered route matched the method and path.
    #[error("")]
    UnknownEndpoint,

    #[error("auth_missing_token")]
    MissingToken,

    /// The token validator refused the token; carries its message verbatim.
    #[error("{0}")]
    InvalidToken(String),

    /// The user repository failed; carries its message verbatim.
    #[error("{0}")]
    UserLookup(String),

    /// The token names a user that does not exist, or whose email differs
    /// from the token's email claim.
    #[error("auth_malformed_token")]
    MalformedToken,

    #[error("user_not_activated")]
    NotActivated,

    #[error("user_not_in_organization")]
    NotInOrganization,

    /// A required permission is missing or the permission lookup failed.
    #[error("insufficient_access")]
    InsufficientAccess,
}

impl Rejection {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::FORBIDDEN
    }

    /// Client-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Internal tag, never sent to the client.
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::UnknownEndpoint => "unknown_endpoint",
            Rejection::MissingToken => "missing_token",
            Rejection::InvalidToken(_) => "invalid_token",
            Rejection::UserLookup(_) => "user_lookup_failed",
            Rejection::MalformedToken => "malformed_token",
            Rejection::NotActivated => "user_not_activated",
            Rejection::NotInOrganization => "user_not_in_organization",
            Rejection::InsufficientAccess => "insufficient_access",
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        status_response(StatusBody::new(false, self.message()), self.status_code())
    }
}
