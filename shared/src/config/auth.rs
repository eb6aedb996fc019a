//! Authentication configuration: JWT signing and password hashing

use serde::{Deserialize, Serialize};

use super::{env_parse, env_var};

/// Development-only signing secret; production start-up refuses it
pub const DEFAULT_JWT_SECRET: &str = "spendly-development-secret-change-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Token lifetime in seconds (7 days)
    pub expiry_seconds: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            expiry_seconds: 604_800,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 10 }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password hashing configuration
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            jwt: JwtConfig {
                secret: env_var("JWT_SECRET").unwrap_or(defaults.jwt.secret),
                expiry_seconds: env_parse("JWT_EXPIRES_IN_SECONDS", defaults.jwt.expiry_seconds),
            },
            password: PasswordConfig {
                // bcrypt accepts 4..=31
                bcrypt_cost: env_parse("BCRYPT_COST", defaults.password.bcrypt_cost).clamp(4, 31),
            },
        }
    }
}
