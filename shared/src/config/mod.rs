//! Configuration module with business-specific sub-modules
//!
//! Every sub-config has a `Default` matching the production-safe values and a
//! `from_env()` constructor that overlays the process environment:
//! - `auth` - JWT signing and password hashing
//! - `cache` - Redis connection for the OTP store
//! - `database` - MySQL connection pool for the user store
//! - `environment` - Environment detection and logging configuration
//! - `otp` - OTP lifetime, cooldown and attempt limits
//! - `server` - HTTP bind address and CORS
//! - `sms` - SMS provider selection and credentials

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod otp;
pub mod server;
pub mod sms;

pub use auth::{AuthConfig, JwtConfig, PasswordConfig, DEFAULT_JWT_SECRET};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;
pub use server::{CorsConfig, ServerConfig};
pub use sms::{AwsSnsSettings, SmsConfig, SmsProviderKind, TwilioSettings};

/// Read an environment variable, treating empty values as unset
pub(crate) fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse an environment variable, falling back to `default` when unset or malformed
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_var(key)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
