//! Built-in handlers served by the `restgate` binary.

use axum::{Json, http::StatusCode, response::Response};
use restgate_core::{IdentityContext, PathParams, StatusBody, message_response, status_response};
use serde::Serialize;

/// `{"message": "<crate version>"}`
pub async fn version() -> Response {
    message_response(env!("CARGO_PKG_VERSION"), StatusCode::OK)
}

pub async fn health() -> Response {
    status_response(StatusBody::new(true, "ok"), StatusCode::OK)
}

#[derive(Debug, Serialize)]
pub struct WhoAmI {
    pub user_id: i64,
    pub organization_id: i64,
}

/// The caller's identity as seen by the pipeline.
pub async fn whoami(identity: IdentityContext) -> Json<WhoAmI> {
    Json(WhoAmI {
        user_id: identity.user_id,
        organization_id: identity.organization_id,
    })
}

#[derive(Debug, Serialize)]
pub struct OrganizationMembers {
    pub organization_id: String,
    pub requested_by: i64,
    pub scoped_to_token: bool,
}

/// Echoes the organization from the path next to the caller's own, so a
/// client can see which tenant the token acts within.
pub async fn organization_members(
    identity: IdentityContext,
    params: PathParams,
) -> Json<OrganizationMembers> {
    let organization_id = params.get("organization_id").unwrap_or_default().to_string();
    Json(OrganizationMembers {
        scoped_to_token: params.parse::<i64>("organization_id") == Some(identity.organization_id),
        organization_id,
        requested_by: identity.user_id,
    })
}
