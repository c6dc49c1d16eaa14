//! HTTPS-only enforcement settings.
//!
//! The service is expected to sit behind a TLS-terminating proxy that sets
//! `X-Forwarded-Proto`. When enforcement is on, any request whose forwarded
//! protocol is not exactly `https` is redirected.

use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpsConfig {
    /// Redirect plain-HTTP requests (`ENFORCE_HTTPS`, default on)
    pub enforce: bool,
}

impl Default for HttpsConfig {
    fn default() -> Self {
        Self::enforced()
    }
}

impl HttpsConfig {
    /// Only an explicit `ENFORCE_HTTPS=false` (or `0`) turns enforcement off.
    pub fn from_env() -> Self {
        Self {
            enforce: env::var("ENFORCE_HTTPS")
                .map(|v| !is_opt_out(&v))
                .unwrap_or(true),
        }
    }

    pub fn enforced() -> Self {
        Self { enforce: true }
    }

    /// For plain-HTTP development setups.
    pub fn disabled() -> Self {
        Self { enforce: false }
    }
}

fn is_opt_out(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("false") || value == "0"
}
