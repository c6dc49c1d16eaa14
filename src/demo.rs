//! Route table served by the `restgate` binary.

use axum::http::Method;
use restgate_observability::PrometheusHandle;

use crate::handlers;
use crate::routing::{RegistryError, RouteRegistry, RouteSpec};

pub const MEMBERS_READ: &str = "members:read";

/// `/version`, `/health` and (when a recorder is installed) `/metrics` are
/// public. `/api/me` needs a valid token; the members listing also needs
/// [`MEMBERS_READ`] in the token's organization.
pub fn demo_registry(metrics: Option<PrometheusHandle>) -> Result<RouteRegistry, RegistryError> {
    let mut builder = RouteRegistry::builder();

    builder
        .register(RouteSpec::get("version", "/version", handlers::version).public())?
        .register(RouteSpec::get("health", "/health", handlers::health).public())?
        .register(RouteSpec::get("whoami", "/api/me", handlers::whoami))?
        .register(
            RouteSpec::new(
                "organization_members",
                Method::GET,
                "/api/organizations/{organization_id}/members",
                handlers::organization_members,
            )
            .require(MEMBERS_READ),
        )?;

    if let Some(handle) = metrics {
        builder.register(
            RouteSpec::get("metrics", "/metrics", move || {
                let handle = handle.clone();
                async move { handle.render() }
            })
            .public(),
        )?;
    }

    Ok(builder.freeze())
}
