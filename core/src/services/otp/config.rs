//! Configuration for the OTP service

use chrono::Duration;
use sp_shared::OtpConfig;

use crate::domain::entities::otp_record::{DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Lifetime of an issued code
    pub code_ttl: Duration,
    /// Minimum time between two issuances for one phone
    pub resend_cooldown: Duration,
    /// Failed submissions allowed per code
    pub max_attempts: u32,
    /// How long a verified code may gate a password reset
    pub verification_window: Duration,
    /// Upper bound on one SMS delivery
    pub delivery_timeout: std::time::Duration,
    /// Prefix turning a national number into an SMS destination
    pub country_prefix: String,
    /// Pepper mixed into every code digest
    pub hash_secret: String,
    /// Minimum length of a new password set through recovery
    pub min_password_length: usize,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl: Duration::minutes(DEFAULT_EXPIRATION_MINUTES),
            resend_cooldown: Duration::seconds(60),
            max_attempts: MAX_ATTEMPTS,
            verification_window: Duration::minutes(10),
            delivery_timeout: std::time::Duration::from_secs(10),
            country_prefix: String::from("+91"),
            hash_secret: String::from("spendly-otp-development-pepper"),
            min_password_length: 8,
        }
    }
}

impl OtpServiceConfig {
    /// Build from loaded settings; the pepper falls back to `fallback_secret`
    pub fn from_settings(settings: &OtpConfig, fallback_secret: &str) -> Self {
        Self {
            code_ttl: Duration::seconds(settings.ttl_seconds),
            resend_cooldown: Duration::seconds(settings.resend_cooldown_seconds),
            max_attempts: settings.max_attempts,
            verification_window: Duration::seconds(settings.verification_window_seconds),
            delivery_timeout: std::time::Duration::from_secs(settings.delivery_timeout_seconds),
            country_prefix: settings.country_prefix.clone(),
            hash_secret: settings
                .hash_secret
                .clone()
                .unwrap_or_else(|| fallback_secret.to_string()),
            ..Default::default()
        }
    }

    /// Code lifetime in whole minutes, rounded up, for the SMS text
    pub fn ttl_minutes(&self) -> i64 {
        (self.code_ttl.num_seconds() + 59) / 60
    }

    /// How long a record must be retained by stores with native expiry
    pub fn retention(&self) -> Duration {
        self.code_ttl + self.verification_window
    }
}
