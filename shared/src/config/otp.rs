//! OTP lifecycle configuration

use serde::{Deserialize, Serialize};

use super::{env_parse, env_var};

/// Timing and limits for one-time password issuance and verification
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Code lifetime from issuance, in seconds
    pub ttl_seconds: i64,

    /// Minimum seconds between two issuances for the same phone
    pub resend_cooldown_seconds: i64,

    /// Failed submissions allowed before the code is invalidated
    pub max_attempts: u32,

    /// How long a verified code may gate a password reset, in seconds
    pub verification_window_seconds: i64,

    /// Upper bound on a single SMS delivery, in seconds
    pub delivery_timeout_seconds: u64,

    /// Prefix prepended to the 10-digit national number
    pub country_prefix: String,

    /// Server-side pepper for code digests; `None` falls back to the JWT secret
    #[serde(skip_serializing)]
    pub hash_secret: Option<String>,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 300,
            resend_cooldown_seconds: 60,
            max_attempts: 3,
            verification_window_seconds: 600,
            delivery_timeout_seconds: 10,
            country_prefix: String::from("+91"),
            hash_secret: None,
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl_seconds: env_parse("OTP_TTL_SECONDS", defaults.ttl_seconds).max(1),
            resend_cooldown_seconds: env_parse(
                "OTP_RESEND_COOLDOWN_SECONDS",
                defaults.resend_cooldown_seconds,
            )
            .max(0),
            max_attempts: env_parse("OTP_MAX_ATTEMPTS", defaults.max_attempts).max(1),
            verification_window_seconds: env_parse(
                "OTP_VERIFICATION_WINDOW_SECONDS",
                defaults.verification_window_seconds,
            )
            .max(1),
            delivery_timeout_seconds: env_parse(
                "OTP_DELIVERY_TIMEOUT_SECONDS",
                defaults.delivery_timeout_seconds,
            )
            .max(1),
            country_prefix: env_var("OTP_COUNTRY_PREFIX").unwrap_or(defaults.country_prefix),
            hash_secret: env_var("OTP_HASH_SECRET"),
        }
    }
}
