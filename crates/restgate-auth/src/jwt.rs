//! HS256 JWT validation.
//!
//! [`JwtTokenValidator`] verifies the signature and expiry of a token
//! signed with the shared secret from [`JwtConfig`] and decodes its
//! [`TokenClaims`]. Failures map to a small set of user-safe messages,
//! since the middleware forwards the validator's message to the client.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use thiserror::Error;

use restgate_config::JwtConfig;

use crate::claims::{AccessTokenClaims, TokenClaims};
use crate::validator::TokenValidator;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("auth_expired_token")]
    Expired,
    #[error("auth_malformed_token")]
    Malformed,
    #[error("auth_invalid_token")]
    Invalid,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => TokenError::Malformed,
            _ => TokenError::Invalid,
        }
    }
}

/// Drop a leading auth scheme (`Bearer`, or any single word followed by
/// whitespace) from a header value. A bare token is returned unchanged.
pub fn strip_scheme(value: &str) -> &str {
    let value = value.trim();
    match value.split_once(char::is_whitespace) {
        Some((_, rest)) => rest.trim_start(),
        None => value,
    }
}

#[derive(Clone)]
pub struct JwtTokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtTokenValidator {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;

        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Synchronous form of [`TokenValidator::validate`].
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        let token = strip_scheme(token);
        if token.is_empty() {
            return Err(TokenError::Malformed);
        }

        decode::<TokenClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims.into())
            .map_err(TokenError::from)
    }
}

#[async_trait]
impl TokenValidator for JwtTokenValidator {
    async fn validate(&self, token: &str) -> anyhow::Result<AccessTokenClaims> {
        Ok(self.verify(token)?)
    }
}
