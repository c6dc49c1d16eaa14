//! # Restgate Auth
//!
//! Token validation for the admission pipeline.
//!
//! - [`validator`]: the [`TokenValidator`] capability the middleware consumes
//! - [`claims`]: decoded [`AccessTokenClaims`] and the JWT wire claims
//! - [`jwt`]: [`JwtTokenValidator`], an HS256 implementation
//!
//! The middleware hands the validator the raw header value (for example
//! `Bearer eyJ...`), so implementations decide how to treat an auth scheme
//! prefix. Token issuance lives outside this crate.
//!
//! # Example
//!
//! ```ignore
//! use restgate_auth::{JwtTokenValidator, TokenValidator};
//! use restgate_config::JwtConfig;
//!
//! let validator = JwtTokenValidator::new(&JwtConfig::from_env());
//! let claims = validator.validate("Bearer eyJ...").await?;
//! println!("user {} in org {}", claims.user_id, claims.organization_id);
//! ```

pub mod claims;
pub mod jwt;
pub mod validator;

pub use claims::{AccessTokenClaims, TokenClaims};
pub use jwt::{JwtTokenValidator, TokenError, strip_scheme};
pub use validator::TokenValidator;
