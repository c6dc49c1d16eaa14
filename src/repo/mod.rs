//! User and permission lookups consulted during admission.
//!
//! Both traits are object-safe and shared as `Arc<dyn ...>`, so a test can
//! swap either one independently. Implementations must tolerate concurrent
//! reads. Error messages from [`UserRepo::get`] are sent to the client
//! verbatim and should be user-safe.

pub mod memory;

use async_trait::async_trait;
use restgate_models::{PermissionSet, User};

pub use memory::{Grant, InMemoryPermissionRepo, InMemoryUserRepo, Seed};

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// `Ok(None)` when no user has this id.
    async fn get(&self, user_id: i64) -> anyhow::Result<Option<User>>;
}

#[async_trait]
pub trait PermissionRepo: Send + Sync {
    /// Permissions `user` holds within `organization_id`.
    async fn permissions(&self, user: &User, organization_id: i64) -> anyhow::Result<PermissionSet>;
}
