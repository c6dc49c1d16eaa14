//! Per-request identity.
//!
//! After a successful admission through the authenticated path the
//! middleware stores an [`IdentityContext`] in the request extensions.
//! Handlers take it as an extractor; public routes that may or may not see
//! one take `Option<IdentityContext>`.
//!
//! ```ignore
//! async fn profile(identity: IdentityContext) -> String {
//!     identity.user_id.to_string()
//! }
//!
//! async fn landing(identity: Option<IdentityContext>) -> &'static str {
//!     if identity.is_some() { "welcome back" } else { "hello" }
//! }
//! ```

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};

use crate::rejection::Rejection;

/// The caller's user and organization for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityContext {
    pub user_id: i64,
    pub organization_id: i64,
}

impl IdentityContext {
    pub fn new(user_id: i64, organization_id: i64) -> Self {
        Self {
            user_id,
            organization_id,
        }
    }
}

impl<S> FromRequestParts<S> for IdentityContext
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<IdentityContext>()
            .copied()
            .ok_or(Rejection::MissingToken)
    }
}

impl<S> OptionalFromRequestParts<S> for IdentityContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<IdentityContext>().copied())
    }
}
