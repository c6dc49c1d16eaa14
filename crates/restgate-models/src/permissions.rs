//! Permission grants.
//!
//! Permissions are opaque strings compared by exact, case-sensitive
//! equality. A route lists the permissions it requires; the caller must hold
//! every one of them in the organization named by the token.

use serde::{Deserialize, Serialize};

/// The permissions a user holds within one organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    pub permissions: Vec<String>,
}

impl PermissionSet {
    pub fn new<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// Set containment: true when every `required` entry is granted.
    /// An empty requirement is always satisfied.
    pub fn contains_all<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|r| self.contains(r.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}
