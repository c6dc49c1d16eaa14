//! # Restgate Core
//!
//! Foundational types shared by every stage of the admission pipeline:
//!
//! - [`identity`]: the per-request [`IdentityContext`] and its extractors
//! - [`path`]: captured path variables ([`PathParams`])
//! - [`rejection`]: the [`Rejection`] kinds an admission can end in
//! - [`response`]: uniform JSON bodies (the response shaper)
//!
//! # Example
//!
//! ```ignore
//! use restgate_core::{IdentityContext, Rejection, status_response};
//!
//! async fn whoami(identity: IdentityContext) -> String {
//!     format!("user {} in org {}", identity.user_id, identity.organization_id)
//! }
//!
//! let response = Rejection::MissingToken.into_response();
//! ```

pub mod identity;
pub mod path;
pub mod rejection;
pub mod response;

pub use identity::IdentityContext;
pub use path::PathParams;
pub use rejection::Rejection;
pub use response::{
    JSON_CONTENT_TYPE, MessageBody, StatusBody, message_response, status_response,
};
