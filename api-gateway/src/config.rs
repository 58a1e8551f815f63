//! Application configuration

use std::env;

/// Default listening address
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listening address
    pub addr: String,
    /// Database URL; the seeded in-memory store is used when absent
    pub database_url: Option<String>,
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn new() -> Self {
        let addr = match env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            Some(port) => format!("0.0.0.0:{}", port),
            None => DEFAULT_ADDR.to_string(),
        };

        Self {
            addr,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
