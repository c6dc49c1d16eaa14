use std::env;

pub const DEFAULT_ALLOW_ORIGIN: &str = "*";
pub const DEFAULT_ALLOW_HEADERS: &str =
    "Origin,authorization,content-type, x-ijt, X-Auth-Token, X-Requested-With";
pub const DEFAULT_ALLOW_METHODS: &str = "GET, POST, PATCH, PUT, DELETE, OPTIONS";

/// Values for the three `Access-Control-Allow-*` headers set on every
/// response. The values are sent exactly as configured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allow_origin: String,
    pub allow_headers: String,
    pub allow_methods: String,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self {
            allow_origin: env::var("CORS_ALLOW_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_ALLOW_ORIGIN.to_string()),
            allow_headers: env::var("CORS_ALLOW_HEADERS")
                .unwrap_or_else(|_| DEFAULT_ALLOW_HEADERS.to_string()),
            allow_methods: env::var("CORS_ALLOW_METHODS")
                .unwrap_or_else(|_| DEFAULT_ALLOW_METHODS.to_string()),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: DEFAULT_ALLOW_ORIGIN.to_string(),
            allow_headers: DEFAULT_ALLOW_HEADERS.to_string(),
            allow_methods: DEFAULT_ALLOW_METHODS.to_string(),
        }
    }
}
