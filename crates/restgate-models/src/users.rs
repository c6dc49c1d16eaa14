//! User record as seen by the authentication middleware.

use serde::{Deserialize, Serialize};

/// A user as resolved by a `UserRepo`.
///
/// Only the fields the admission pipeline inspects are modelled: the
/// identity cross-check uses `email`, the activation gate uses `activated`,
/// and the tenant membership check uses `organizations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Numeric user id (matches the token's `user_id` claim)
    pub id: i64,
    /// Email address the token's `email` claim must equal
    pub email: String,
    /// Deactivated users are rejected even with a valid token
    #[serde(default)]
    pub activated: bool,
    /// Ids of the organizations (tenants) the user belongs to
    #[serde(default)]
    pub organizations: Vec<i64>,
}

impl User {
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            activated: false,
            organizations: Vec::new(),
        }
    }

    pub fn activated(mut self) -> Self {
        self.activated = true;
        self
    }

    pub fn with_organizations(mut self, organizations: impl IntoIterator<Item = i64>) -> Self {
        self.organizations = organizations.into_iter().collect();
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn organizations(&self) -> &[i64] {
        &self.organizations
    }

    /// Integer equality against the membership list.
    pub fn belongs_to(&self, organization_id: i64) -> bool {
        self.organizations.contains(&organization_id)
    }
}
