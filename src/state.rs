use restgate_config::HttpsConfig;

use crate::middleware::{AuthState, CorsHeaders};

/// Everything the admission pipeline needs.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub https: HttpsConfig,
    pub cors: CorsHeaders,
}

impl AppState {
    /// HTTPS enforcement on, default CORS headers.
    pub fn new(auth: AuthState) -> Self {
        Self {
            auth,
            https: HttpsConfig::default(),
            cors: CorsHeaders::default(),
        }
    }

    pub fn with_https(mut self, https: HttpsConfig) -> Self {
        self.https = https;
        self
    }

    pub fn with_cors(mut self, cors: CorsHeaders) -> Self {
        self.cors = cors;
        self
    }
}
