use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use restgate_observability::logging_middleware;

use crate::middleware::{auth_middleware, cors_prelude, https_middleware};
use crate::routing::MatchedRoute;
use crate::state::AppState;

/// Run the handler of the route the request was admitted for. Requests
/// forwarded without a route (`OPTIONS`) get an empty `200`.
pub async fn dispatch(req: Request) -> Response {
    match req.extensions().get::<MatchedRoute>().cloned() {
        Some(MatchedRoute(route)) => route.call(req).await,
        None => StatusCode::OK.into_response(),
    }
}

/// The full pipeline over the registry in `state`.
pub fn init_router(state: AppState) -> Router {
    with_admission(Router::new().fallback(dispatch), &state)
}

/// Put `router` behind the admission chain. From the outside in: request
/// logging, CORS headers, HTTPS enforcement, authentication.
pub fn with_admission(router: Router, state: &AppState) -> Router {
    let router = router
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.https.clone(),
            https_middleware,
        ));

    cors_prelude(router, &state.cors).layer(middleware::from_fn(logging_middleware))
}
