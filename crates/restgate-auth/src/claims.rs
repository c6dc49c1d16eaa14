//! Token claims.

use serde::{Deserialize, Serialize};

/// What the pipeline needs from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenClaims {
    pub user_id: i64,
    pub organization_id: i64,
    pub email: String,
}

impl AccessTokenClaims {
    pub fn new(user_id: i64, organization_id: i64, email: impl Into<String>) -> Self {
        Self {
            user_id,
            organization_id,
            email: email.into(),
        }
    }
}

/// JWT payload accepted by [`JwtTokenValidator`](crate::JwtTokenValidator).
///
/// - `user_id`: numeric user id
/// - `organization_id`: organization the token acts within
/// - `email`: must match the stored user's email
/// - `exp` / `iat`: Unix timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: i64,
    pub organization_id: i64,
    pub email: String,
    pub exp: usize,
    #[serde(default)]
    pub iat: usize,
}

impl From<TokenClaims> for AccessTokenClaims {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            organization_id: claims.organization_id,
            email: claims.email,
        }
    }
}
