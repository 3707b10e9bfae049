// Database configuration loaded from environment variables.
// Decision: DATABASE_URL wins; otherwise compose one from DB_* parts
// Decision: Defaults match the docker-compose service (host "db", root/root, user_data)

use anyhow::{Context, Result};
use std::time::Duration;

const DEFAULT_HOST: &str = "db";
const DEFAULT_USER: &str = "root";
const DEFAULT_PASSWORD: &str = "root";
const DEFAULT_NAME: &str = "user_data";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (extracted for testing)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = match lookup("DATABASE_URL").filter(|s| !s.is_empty()) {
            Some(url) => url,
            None => {
                let host = lookup("DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
                let user = lookup("DB_USER").unwrap_or_else(|| DEFAULT_USER.to_string());
                let password =
                    lookup("DB_PASSWORD").unwrap_or_else(|| DEFAULT_PASSWORD.to_string());
                let name = lookup("DB_NAME").unwrap_or_else(|| DEFAULT_NAME.to_string());
                format!("postgres://{user}:{password}@{host}/{name}")
            }
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be an integer, got {v:?}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let acquire_timeout_secs = match lookup("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("DB_ACQUIRE_TIMEOUT_SECS must be an integer, got {v:?}"))?,
            None => DEFAULT_ACQUIRE_TIMEOUT_SECS,
        };

        Ok(Self {
            url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        })
    }
}
