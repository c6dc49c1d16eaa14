//! In-memory repositories for development and tests.
//!
//! Both stores can be filled from a JSON seed file:
//!
//! ```json
//! {
//!   "users": [
//!     {"id": 100, "email": "example@example.com", "activated": true, "organizations": [1000]}
//!   ],
//!   "grants": [
//!     {"user_id": 100, "organization_id": 1000, "permissions": ["members:read"]}
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use restgate_models::{PermissionSet, User};
use serde::{Deserialize, Serialize};

use super::{PermissionRepo, UserRepo};

#[derive(Debug, Default)]
pub struct InMemoryUserRepo {
    users: RwLock<HashMap<i64, User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user.
    pub fn insert(&self, user: User) {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.id, user);
    }

    pub fn len(&self) -> usize {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<User> for InMemoryUserRepo {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        Self {
            users: RwLock::new(iter.into_iter().map(|u| (u.id, u)).collect()),
        }
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn get(&self, user_id: i64) -> anyhow::Result<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| anyhow!("user_store_unavailable"))?;
        Ok(users.get(&user_id).cloned())
    }
}

/// Grants keyed by `(user_id, organization_id)`. A user with no grant in
/// an organization holds an empty permission set there.
#[derive(Debug, Default)]
pub struct InMemoryPermissionRepo {
    grants: RwLock<HashMap<(i64, i64), PermissionSet>>,
}

impl InMemoryPermissionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add permissions to a user's set in an organization.
    pub fn grant<I, S>(&self, user_id: i64, organization_id: i64, permissions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut grants = self.grants.write().unwrap_or_else(PoisonError::into_inner);
        let set = grants.entry((user_id, organization_id)).or_default();
        for permission in permissions {
            let permission = permission.into();
            if !set.contains(&permission) {
                set.permissions.push(permission);
            }
        }
    }
}

#[async_trait]
impl PermissionRepo for InMemoryPermissionRepo {
    async fn permissions(&self, user: &User, organization_id: i64) -> anyhow::Result<PermissionSet> {
        let grants = self
            .grants
            .read()
            .map_err(|_| anyhow!("permission_store_unavailable"))?;
        Ok(grants
            .get(&(user.id, organization_id))
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub user_id: i64,
    pub organization_id: i64,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Initial contents for the in-memory repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub grants: Vec<Grant>,
}

impl Seed {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse seed file {}", path.display()))
    }

    pub fn into_repos(self) -> (InMemoryUserRepo, InMemoryPermissionRepo) {
        let users: InMemoryUserRepo = self.users.into_iter().collect();
        let permissions = InMemoryPermissionRepo::new();
        for grant in self.grants {
            permissions.grant(grant.user_id, grant.organization_id, grant.permissions);
        }
        (users, permissions)
    }
}
