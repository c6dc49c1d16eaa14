mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::Utc;
use common::{Scenario, USER_ID, get, send};
use jsonwebtoken::{EncodingKey, Header, encode};
use restgate::demo::{MEMBERS_READ, demo_registry};
use restgate::repo::{InMemoryPermissionRepo, InMemoryUserRepo};
use restgate::{AppState, AuthState, RouteSpec, init_router};
use restgate_auth::{JwtTokenValidator, TokenClaims};
use restgate_config::{HttpsConfig, JwtConfig};
use restgate_core::PathParams;
use restgate_models::User;

const SECRET: &str = "integration_test_secret";

#[tokio::test]
async fn access_log_records_forwarded_requests() {
    let scenario = Scenario::new();

    send(
        scenario.app(),
        get("/private?page=2")
            .header(header::AUTHORIZATION, "Bearer t")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    send(scenario.app(), get("/public").body(Body::empty()).unwrap()).await;
    send(
        scenario.app(),
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/whatever")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    let entries = scenario.access_log.entries();
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0].method, Method::GET);
    assert_eq!(entries[0].uri, "/private?page=2");
    assert_eq!(entries[0].route_name, "private");
    assert_eq!(entries[0].user_id, Some(USER_ID));
    assert!(entries[0].to_string().starts_with("GET /private?page=2 private userId=100 "));

    assert_eq!(entries[1].route_name, "public");
    assert_eq!(entries[1].user_id, None);
    assert!(entries[1].to_string().contains("userId=<nil>"));

    assert_eq!(entries[2].method, Method::OPTIONS);
    assert_eq!(entries[2].route_name, "");
}

#[tokio::test]
async fn access_log_skips_rejections() {
    let scenario = Scenario::new();

    send(scenario.app(), get("/private").body(Body::empty()).unwrap()).await;
    send(scenario.app(), get("/nowhere").body(Body::empty()).unwrap()).await;

    assert!(scenario.access_log.entries().is_empty());
}

#[tokio::test]
async fn handler_reads_path_params() {
    let scenario = Scenario::new().routes(vec![
        RouteSpec::get(
            "org_report",
            "/organizations/{organization_id}/reports/{report}",
            |params: PathParams| async move {
                format!(
                    "{}/{}",
                    params.parse::<i64>("organization_id").unwrap_or_default(),
                    params.get("report").unwrap_or_default()
                )
            },
        )
        .public(),
    ]);

    let response = send(
        scenario.app(),
        get("/organizations/1000/reports/monthly/")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "1000/monthly");
}

#[tokio::test]
async fn path_params_are_percent_decoded() {
    let scenario = Scenario::new().routes(vec![
        RouteSpec::get("file", "/files/{name}", |params: PathParams| async move {
            params.get("name").unwrap_or_default().to_string()
        })
        .public(),
        RouteSpec::get("me", "/users/me", || async { "me" }).public(),
    ]);

    let response = send(scenario.app(), get("/files/a%20b").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "a b");

    let response = send(scenario.app(), get("/users/%6De").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "me");
}

#[tokio::test]
async fn handler_response_keeps_its_status_and_gets_cors_headers() {
    let scenario = Scenario::new().routes(vec![
        RouteSpec::post("create", "/items", || async { StatusCode::CREATED }).public(),
    ]);

    let response = send(
        scenario.app(),
        Request::builder()
            .method(Method::POST)
            .uri("/items")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

fn sign(user_id: i64, organization_id: i64, email: &str) -> String {
    let now = Utc::now().timestamp() as usize;
    let claims = TokenClaims {
        user_id,
        organization_id,
        email: email.to_string(),
        exp: now + 3600,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn demo_state() -> AppState {
    let users: InMemoryUserRepo = [
        User::new(100, "example@example.com")
            .activated()
            .with_organizations([1000, 2000]),
        User::new(101, "inactive@example.com").with_organizations([1000]),
    ]
    .into_iter()
    .collect();

    let permissions = InMemoryPermissionRepo::new();
    permissions.grant(100, 1000, [MEMBERS_READ]);

    let auth = AuthState::new(
        Arc::new(demo_registry(None).unwrap()),
        Arc::new(JwtTokenValidator::new(&JwtConfig::new(SECRET))),
        Arc::new(users),
    )
    .with_permissions(Arc::new(permissions));

    AppState::new(auth)
}

fn demo_app() -> axum::Router {
    init_router(demo_state())
}

/// A request as it arrives from the TLS-terminating proxy.
fn secure(uri: &str) -> axum::http::request::Builder {
    get(uri).header("x-forwarded-proto", "https")
}

fn with_token(uri: &str, token: &str) -> Request<Body> {
    secure(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn jwt_end_to_end_with_in_memory_repos() {
    let token = sign(100, 1000, "example@example.com");

    let response = send(demo_app(), with_token("/api/me", &token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["user_id"], 100);
    assert_eq!(response.json()["organization_id"], 1000);

    let response = send(
        demo_app(),
        with_token("/api/organizations/1000/members", &token),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["scoped_to_token"], true);
}

#[tokio::test]
async fn jwt_permissions_are_scoped_to_token_organization() {
    let token = sign(100, 2000, "example@example.com");

    let response = send(
        demo_app(),
        with_token("/api/organizations/2000/members", &token),
    )
    .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.message(), "insufficient_access");

    let response = send(demo_app(), with_token("/api/me", &token)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn jwt_errors_surface_validator_message() {
    let response = send(demo_app(), with_token("/api/me", "not-a-jwt")).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.message(), "auth_malformed_token");

    let inactive = sign(101, 1000, "inactive@example.com");
    let response = send(demo_app(), with_token("/api/me", &inactive)).await;
    assert_eq!(response.message(), "user_not_activated");

    let unknown = sign(999, 1000, "ghost@example.com");
    let response = send(demo_app(), with_token("/api/me", &unknown)).await;
    assert_eq!(response.message(), "auth_malformed_token");
}

#[tokio::test]
async fn version_is_public() {
    let response = send(demo_app(), secure("/version").body(Body::empty()).unwrap()).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], env!("CARGO_PKG_VERSION"));
    assert!(response.json().get("status").is_none());
}

#[tokio::test]
async fn default_pipeline_redirects_plain_http() {
    let response = send(
        demo_app(),
        get("/a?b=c")
            .header(header::HOST, "example.com")
            .header("x-forwarded-proto", "http")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers[header::LOCATION], "https://example.com/a?b=c");
    assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let response = send(demo_app(), get("/version").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn default_pipeline_can_opt_out_of_https() {
    let app = init_router(demo_state().with_https(HttpsConfig::disabled()));

    let response = send(
        app,
        get("/version")
            .header("x-forwarded-proto", "http")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
}
