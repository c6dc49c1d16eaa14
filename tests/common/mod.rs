#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderMap, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use restgate::{
    AccessLogEntry, AccessLogSink, AppState, AuthState, PermissionRepo, RouteRegistry, RouteSpec,
    UserRepo, dispatch, with_admission,
};
use restgate_auth::{AccessTokenClaims, TokenValidator};
use restgate_config::HttpsConfig;
use restgate_core::IdentityContext;
use restgate_models::{PermissionSet, User};
use tower::ServiceExt;

pub const USER_ID: i64 = 100;
pub const ORGANIZATION_ID: i64 = 1000;
pub const EMAIL: &str = "example@example.com";
pub const REQUIRED_PERMISSION: &str = "req_perm";

/// Returns a fixed result and remembers every token it was asked about.
pub struct StubValidator {
    result: Result<AccessTokenClaims, String>,
    tokens: Mutex<Vec<String>>,
}

impl StubValidator {
    pub fn accepting(claims: AccessTokenClaims) -> Self {
        Self {
            result: Ok(claims),
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenValidator for StubValidator {
    async fn validate(&self, token: &str) -> anyhow::Result<AccessTokenClaims> {
        self.tokens.lock().unwrap().push(token.to_string());
        self.result.clone().map_err(anyhow::Error::msg)
    }
}

pub struct StubUserRepo {
    result: Result<Option<User>, String>,
    calls: AtomicUsize,
}

impl StubUserRepo {
    pub fn returning(user: Option<User>) -> Self {
        Self {
            result: Ok(user),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepo for StubUserRepo {
    async fn get(&self, _user_id: i64) -> anyhow::Result<Option<User>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map_err(anyhow::Error::msg)
    }
}

pub struct StubPermissionRepo {
    result: Result<PermissionSet, String>,
}

impl StubPermissionRepo {
    pub fn granting<const N: usize>(permissions: [&str; N]) -> Self {
        Self {
            result: Ok(PermissionSet::new(permissions)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl PermissionRepo for StubPermissionRepo {
    async fn permissions(&self, _user: &User, _organization_id: i64) -> anyhow::Result<PermissionSet> {
        self.result.clone().map_err(anyhow::Error::msg)
    }
}

#[derive(Default)]
pub struct RecordingAccessLog {
    entries: Mutex<Vec<AccessLogEntry>>,
}

impl RecordingAccessLog {
    pub fn entries(&self) -> Vec<AccessLogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl AccessLogSink for RecordingAccessLog {
    fn record(&self, entry: &AccessLogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

/// Records every request that made it past the admission chain, with the
/// identity it carried.
#[derive(Default)]
pub struct HandlerProbe {
    calls: AtomicUsize,
    identities: Mutex<Vec<Option<IdentityContext>>>,
}

impl HandlerProbe {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_identity(&self) -> Option<IdentityContext> {
        self.identities.lock().unwrap().last().copied().flatten()
    }

    fn hit(&self, identity: Option<IdentityContext>) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.identities.lock().unwrap().push(identity);
    }
}

pub fn valid_user() -> User {
    User::new(USER_ID, EMAIL)
        .activated()
        .with_organizations([ORGANIZATION_ID])
}

pub fn valid_claims() -> AccessTokenClaims {
    AccessTokenClaims::new(USER_ID, ORGANIZATION_ID, EMAIL)
}

/// A private route at `/private` requiring `req_perm` and a public route at
/// `/public`, with collaborators that admit the canonical user and HTTPS
/// enforcement off. Each collaborator can be replaced before
/// [`Scenario::app`] is called.
pub struct Scenario {
    pub validator: Arc<StubValidator>,
    pub users: Arc<StubUserRepo>,
    pub permissions: Option<Arc<StubPermissionRepo>>,
    pub access_log: Arc<RecordingAccessLog>,
    pub probe: Arc<HandlerProbe>,
    pub https: HttpsConfig,
    routes: Vec<RouteSpec>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario {
    pub fn new() -> Self {
        Self {
            validator: Arc::new(StubValidator::accepting(valid_claims())),
            users: Arc::new(StubUserRepo::returning(Some(valid_user()))),
            permissions: Some(Arc::new(StubPermissionRepo::granting([REQUIRED_PERMISSION]))),
            access_log: Arc::new(RecordingAccessLog::default()),
            probe: Arc::new(HandlerProbe::default()),
            https: HttpsConfig::disabled(),
            routes: vec![
                RouteSpec::get("public", "/public", || async { "public" }).public(),
                RouteSpec::get("private", "/private", || async { "private" })
                    .require(REQUIRED_PERMISSION),
            ],
        }
    }

    pub fn validator(mut self, validator: StubValidator) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    pub fn users(mut self, users: StubUserRepo) -> Self {
        self.users = Arc::new(users);
        self
    }

    pub fn user(self, user: User) -> Self {
        self.users(StubUserRepo::returning(Some(user)))
    }

    pub fn permissions(mut self, permissions: StubPermissionRepo) -> Self {
        self.permissions = Some(Arc::new(permissions));
        self
    }

    pub fn without_permissions(mut self) -> Self {
        self.permissions = None;
        self
    }

    pub fn routes(mut self, routes: Vec<RouteSpec>) -> Self {
        self.routes = routes;
        self
    }

    pub fn enforce_https(mut self) -> Self {
        self.https = HttpsConfig::enforced();
        self
    }

    pub fn state(&self) -> AppState {
        let mut builder = RouteRegistry::builder();
        for route in &self.routes {
            builder.register(route.clone()).unwrap();
        }

        let validator: Arc<dyn TokenValidator> = self.validator.clone();
        let users: Arc<dyn UserRepo> = self.users.clone();
        let mut auth = AuthState::new(Arc::new(builder.freeze()), validator, users)
            .with_access_log(self.access_log.clone());
        if let Some(permissions) = &self.permissions {
            let permissions: Arc<dyn PermissionRepo> = permissions.clone();
            auth = auth.with_permissions(permissions);
        }

        AppState::new(auth).with_https(self.https.clone())
    }

    /// The admission chain in front of [`dispatch`], with the probe
    /// recording each forwarded request.
    pub fn app(&self) -> Router {
        let probe = Arc::clone(&self.probe);
        let terminal = Router::new().fallback(move |req: Request| {
            let probe = Arc::clone(&probe);
            async move {
                probe.hit(req.extensions().get::<IdentityContext>().copied());
                dispatch(req).await
            }
        });
        with_admission(terminal, &self.state())
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }

    pub fn message(&self) -> String {
        self.json()["message"].as_str().unwrap().to_string()
    }
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(body.to_vec()).unwrap(),
    }
}

pub fn get(uri: &str) -> axum::http::request::Builder {
    Request::builder().method("GET").uri(uri)
}
