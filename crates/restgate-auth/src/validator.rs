use async_trait::async_trait;

use crate::claims::AccessTokenClaims;

/// Parses and verifies a bearer token.
///
/// The error's `Display` is sent to the client verbatim as the rejection
/// message, so implementations must only produce user-safe messages.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate(&self, token: &str) -> anyhow::Result<AccessTokenClaims>;
}
