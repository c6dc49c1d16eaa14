//! Authentication and authorization middleware.
//!
//! Every request other than `OPTIONS` must match a registered route. Public
//! routes are forwarded as they are. Anything else needs a token that the
//! [`TokenValidator`] accepts, belonging to an activated user who is a
//! member of the token's organization and, when a [`PermissionRepo`] is
//! configured, holds every permission the route requires there.
//!
//! Checks run in a fixed order and the first failure decides the response,
//! which is always `403` with a `{status: false, message}` body.
//! A forwarded request carries its [`MatchedRoute`], [`PathParams`] and,
//! on the authenticated path, an [`IdentityContext`] in its extensions.
//!
//! # Tokens
//!
//! A non-empty `Sec-WebSocket-Protocol` header takes precedence over
//! `Authorization`, since browsers cannot set headers on a WebSocket
//! handshake. Its value has the form `<scheme>_Space_<token>,<subprotocol>`:
//! every `_Space_` becomes a space and the value is cut at the first comma.
//! A value without a comma yields no token. The `Authorization` value is
//! passed to the validator verbatim.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use restgate_auth::TokenValidator;
use restgate_core::{IdentityContext, PathParams, Rejection};
use restgate_observability::track_admission;
use tracing::debug;

use crate::middleware::access_log::{AccessLogEntry, AccessLogSink, TracingAccessLog};
use crate::repo::{PermissionRepo, UserRepo};
use crate::routing::{MatchedRoute, RouteMatch, RouteRegistry};

const WEBSOCKET_SPACE: &str = "_Space_";

/// Collaborators the authentication middleware consults.
#[derive(Clone)]
pub struct AuthState {
    registry: Arc<RouteRegistry>,
    validator: Arc<dyn TokenValidator>,
    users: Arc<dyn UserRepo>,
    permissions: Option<Arc<dyn PermissionRepo>>,
    access_log: Arc<dyn AccessLogSink>,
}

impl AuthState {
    pub fn new(
        registry: Arc<RouteRegistry>,
        validator: Arc<dyn TokenValidator>,
        users: Arc<dyn UserRepo>,
    ) -> Self {
        Self {
            registry,
            validator,
            users,
            permissions: None,
            access_log: Arc::new(TracingAccessLog),
        }
    }

    /// Enable the authorization step.
    pub fn with_permissions(mut self, permissions: Arc<dyn PermissionRepo>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn with_access_log(mut self, access_log: Arc<dyn AccessLogSink>) -> Self {
        self.access_log = access_log;
        self
    }

    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }
}

/// A decision to forward.
#[derive(Debug, Clone)]
pub struct Admission {
    /// `None` only for the `OPTIONS` bypass.
    pub route: Option<RouteMatch>,
    /// `None` for `OPTIONS` and public routes.
    pub identity: Option<IdentityContext>,
    /// Metrics label: `options`, `public` or `forwarded`.
    pub outcome: &'static str,
}

/// The token carried by a request, or an empty string. Header bytes that
/// are not UTF-8 become U+FFFD instead of discarding the header.
pub fn extract_token(headers: &HeaderMap) -> String {
    let header_text = |name: HeaderName| {
        headers
            .get(name)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .unwrap_or_default()
    };

    let websocket = header_text(header::SEC_WEBSOCKET_PROTOCOL);
    if !websocket.is_empty() {
        return decode_websocket_token(&websocket);
    }

    header_text(header::AUTHORIZATION)
}

/// Decode a `Sec-WebSocket-Protocol` token. Without a comma there is no
/// token and the result is empty.
pub fn decode_websocket_token(value: &str) -> String {
    let decoded = value.replace(WEBSOCKET_SPACE, " ");
    match decoded.find(',') {
        Some(end) => decoded[..end].to_string(),
        None => String::new(),
    }
}

/// Decide whether a request may reach its handler.
pub async fn admit(
    state: &AuthState,
    method: &Method,
    path: &str,
    headers: &HeaderMap,
) -> Result<Admission, Rejection> {
    if method == Method::OPTIONS {
        return Ok(Admission {
            route: None,
            identity: None,
            outcome: "options",
        });
    }

    let matched = state
        .registry
        .match_route(method, path)
        .ok_or(Rejection::UnknownEndpoint)?;

    if matched.route.is_public() {
        return Ok(Admission {
            route: Some(matched),
            identity: None,
            outcome: "public",
        });
    }

    let token = extract_token(headers);
    if token.is_empty() {
        return Err(Rejection::MissingToken);
    }

    let claims = state
        .validator
        .validate(&token)
        .await
        .map_err(|e| Rejection::InvalidToken(e.to_string()))?;

    let user = state
        .users
        .get(claims.user_id)
        .await
        .map_err(|e| Rejection::UserLookup(e.to_string()))?
        .ok_or(Rejection::MalformedToken)?;

    if user.email() != claims.email {
        return Err(Rejection::MalformedToken);
    }

    if !user.is_activated() {
        return Err(Rejection::NotActivated);
    }

    if !user.belongs_to(claims.organization_id) {
        return Err(Rejection::NotInOrganization);
    }

    if let Some(permissions) = &state.permissions {
        let granted = permissions
            .permissions(&user, claims.organization_id)
            .await
            .map_err(|e| {
                debug!(user_id = user.id, error = %e, "Permission lookup failed");
                Rejection::InsufficientAccess
            })?;

        if !granted.contains_all(matched.route.required_permissions()) {
            return Err(Rejection::InsufficientAccess);
        }
    }

    Ok(Admission {
        route: Some(matched),
        identity: Some(IdentityContext::new(claims.user_id, claims.organization_id)),
        outcome: "forwarded",
    })
}

/// Admit or reject, then record the access log line for forwarded
/// requests once the handler has returned.
///
/// ```ignore
/// let app = Router::new()
///     .fallback(dispatch)
///     .layer(middleware::from_fn_with_state(auth_state, auth_middleware));
/// ```
pub async fn auth_middleware(State(state): State<AuthState>, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let (mut parts, body) = req.into_parts();

    let admission = match admit(&state, &parts.method, parts.uri.path(), &parts.headers).await {
        Ok(admission) => admission,
        Err(rejection) => {
            debug!(
                method = %parts.method,
                uri = %parts.uri,
                reason = rejection.reason(),
                "Request rejected"
            );
            track_admission(rejection.reason());
            return rejection.into_response();
        }
    };
    track_admission(admission.outcome);

    let mut route_name = String::new();
    if let Some(RouteMatch { route, params }) = admission.route {
        route_name = route.name().to_string();
        parts.extensions.insert(MatchedRoute(route));
        parts.extensions.insert::<PathParams>(params);
    }
    if let Some(identity) = admission.identity {
        parts.extensions.insert(identity);
    }

    let method = parts.method.clone();
    let uri = parts.uri.clone();
    let response = next.run(Request::from_parts(parts, body)).await;

    state.access_log.record(&AccessLogEntry {
        method,
        uri,
        route_name,
        user_id: admission.identity.map(|identity| identity.user_id),
        elapsed: start.elapsed(),
    });

    response
}
