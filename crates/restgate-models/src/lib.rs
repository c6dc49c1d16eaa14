//! # Restgate Models
//!
//! Plain records exchanged between the admission pipeline and its
//! persistence collaborators.
//!
//! - [`users`]: the [`User`] record a `UserRepo` resolves from a token's user id
//! - [`permissions`]: the [`PermissionSet`] a `PermissionRepo` grants per organization
//!
//! Both derive serde so repositories can load them straight from JSON.

pub mod permissions;
pub mod users;

pub use permissions::PermissionSet;
pub use users::User;
