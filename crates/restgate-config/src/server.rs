use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: String,
    /// JSON file seeding the in-memory user and permission repositories.
    pub seed_file: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            seed_file: env::var("SEED_FILE").ok().filter(|s| !s.trim().is_empty()),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            seed_file: None,
        }
    }
}
