//! # Restgate
//!
//! A request admission pipeline for axum services. Routes are declared up
//! front with a policy (public, or a list of required permissions), and
//! every request passes the same chain before any handler runs:
//!
//! ```text
//! logging → CORS headers → HTTPS enforcement → route match → authentication
//!         → authorization → handler (with IdentityContext)
//! ```
//!
//! ## Layout
//!
//! ```text
//! src/
//! ├── routing/      # RouteSpec, path patterns, RouteRegistry
//! ├── middleware/   # CORS prelude, HTTPS enforcer, auth, access log
//! ├── repo/         # UserRepo / PermissionRepo + in-memory stores
//! ├── handlers.rs   # /version, /health and demo handlers
//! ├── demo.rs       # route table of the restgate binary
//! ├── router.rs     # pipeline assembly and dispatch
//! └── state.rs      # AppState
//! ```
//!
//! Shared types live in the workspace crates: `restgate-core` (identity,
//! rejections, response bodies), `restgate-auth` (token validation),
//! `restgate-models`, `restgate-config` and `restgate-observability`.
//!
//! ## Rejections
//!
//! Every admission failure is `403 Forbidden` with a JSON body:
//!
//! ```text
//! {"message":"user_not_in_organization","status":false}
//! ```
//!
//! An unknown endpoint gets the same status with an empty message.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use axum::http::Method;
//! use restgate::{AppState, AuthState, RouteRegistry, RouteSpec, init_router};
//!
//! let mut builder = RouteRegistry::builder();
//! builder
//!     .register(RouteSpec::get("version", "/version", version).public())?
//!     .register(
//!         RouteSpec::new("members", Method::GET, "/orgs/{org_id}/members", members)
//!             .require("members:read"),
//!     )?;
//!
//! let auth = AuthState::new(Arc::new(builder.freeze()), validator, users)
//!     .with_permissions(permissions);
//! let app = init_router(AppState::new(auth));
//! ```

pub mod demo;
pub mod handlers;
pub mod middleware;
pub mod repo;
pub mod router;
pub mod routing;
pub mod state;

pub use middleware::{AccessLogEntry, AccessLogSink, AuthState, CorsHeaders, TracingAccessLog};
pub use repo::{PermissionRepo, UserRepo};
pub use router::{dispatch, init_router, with_admission};
pub use routing::{RegistryError, RouteMatch, RouteRegistry, RouteRegistryBuilder, RouteSpec};
pub use state::AppState;
