//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::{env_parse, env_var};

/// Redis configuration for the OTP store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Prefix for every key written by this service
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            key_prefix: String::from("otp:"),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables, `None` when `REDIS_URL` is unset
    pub fn from_env() -> Option<Self> {
        let url = env_var("REDIS_URL")?;
        let defaults = Self::default();
        Some(Self {
            url,
            connection_timeout: env_parse("REDIS_CONNECTION_TIMEOUT", defaults.connection_timeout),
            key_prefix: env_var("REDIS_KEY_PREFIX").unwrap_or(defaults.key_prefix),
        })
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}
