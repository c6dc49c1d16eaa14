//! # Restgate Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`cors`]: CORS response headers added to every response
//! - [`https`]: HTTPS-only enforcement behind a TLS-terminating proxy
//! - [`jwt`]: JWT validation settings
//! - [`server`]: bind address and in-memory seed data
//!
//! # Example
//!
//! ```ignore
//! use restgate_config::{CorsConfig, HttpsConfig, JwtConfig, ServerConfig};
//!
//! dotenvy::dotenv().ok();
//! let cors = CorsConfig::from_env();
//! let https = HttpsConfig::from_env();
//! let jwt = JwtConfig::from_env();
//! let server = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod https;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use https::HttpsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

