use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

use axum::{extract::Request, handler::Handler, http::Method, response::Response};

pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// A type-erased request handler.
///
/// Any axum handler (an async fn whose arguments are extractors) is
/// accepted by [`RouteSpec::new`] and stored behind this trait.
pub trait RouteHandler: Send + Sync + 'static {
    fn call(&self, req: Request) -> HandlerFuture;
}

struct AxumHandler<H, T> {
    handler: H,
    _marker: PhantomData<fn() -> T>,
}

impl<H, T> RouteHandler for AxumHandler<H, T>
where
    H: Handler<T, ()> + Sync,
    T: 'static,
{
    fn call(&self, req: Request) -> HandlerFuture {
        Box::pin(Handler::call(self.handler.clone(), req, ()))
    }
}

/// A route: method, path pattern, handler and admission policy.
///
/// ```ignore
/// let spec = RouteSpec::new("members", Method::GET, "/orgs/{org_id}/members", list_members)
///     .require("members:read");
/// ```
#[derive(Clone)]
pub struct RouteSpec {
    name: String,
    method: Method,
    pattern: String,
    handler: Arc<dyn RouteHandler>,
    public: bool,
    required_permissions: Vec<String>,
}

impl RouteSpec {
    pub fn new<H, T>(
        name: impl Into<String>,
        method: Method,
        pattern: impl Into<String>,
        handler: H,
    ) -> Self
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        Self {
            name: name.into(),
            method,
            pattern: pattern.into(),
            handler: Arc::new(AxumHandler {
                handler,
                _marker: PhantomData,
            }),
            public: false,
            required_permissions: Vec::new(),
        }
    }

    pub fn get<H, T>(name: impl Into<String>, pattern: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        Self::new(name, Method::GET, pattern, handler)
    }

    pub fn post<H, T>(name: impl Into<String>, pattern: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        Self::new(name, Method::POST, pattern, handler)
    }

    /// Exempt this route from token validation.
    pub fn public(mut self) -> Self {
        self.public = true;
        self
    }

    pub fn require(mut self, permission: impl Into<String>) -> Self {
        self.required_permissions.push(permission.into());
        self
    }

    pub fn require_all<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn required_permissions(&self) -> &[String] {
        &self.required_permissions
    }

    pub fn call(&self, req: Request) -> HandlerFuture {
        self.handler.call(req)
    }
}

impl fmt::Debug for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSpec")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("public", &self.public)
            .field("required_permissions", &self.required_permissions)
            .finish_non_exhaustive()
    }
}

/// The route an admitted request was matched to, stored in the request
/// extensions for [`dispatch`](crate::router::dispatch).
#[derive(Debug, Clone)]
pub struct MatchedRoute(pub Arc<RouteSpec>);
