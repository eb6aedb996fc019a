//! Database configuration module

use serde::{Deserialize, Serialize};

use super::{env_parse, env_var};

/// Database configuration for the MySQL user store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("mysql://localhost:3306/spendly"),
            max_connections: 10,
            connect_timeout: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    ///
    /// Returns `None` when `DATABASE_URL` is not set; callers decide whether
    /// an in-memory store is acceptable for the running environment.
    pub fn from_env() -> Option<Self> {
        let url = env_var("DATABASE_URL")?;
        let defaults = Self::default();
        Some(Self {
            url,
            max_connections: env_parse("DATABASE_MAX_CONNECTIONS", defaults.max_connections),
            connect_timeout: env_parse("DATABASE_CONNECT_TIMEOUT", defaults.connect_timeout),
        })
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = DatabaseConfig::new("mysql://db:3306/spendly").with_max_connections(25);
        assert_eq!(config.url, "mysql://db:3306/spendly");
        assert_eq!(config.max_connections, 25);
        assert_eq!(config.connect_timeout, 30);
    }
}
