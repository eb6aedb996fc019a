//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborator traits defined in `sp_core`:
//! - **Database**: MySQL user repository using SQLx
//! - **Cache**: Redis-backed OTP record store
//! - **SMS**: Twilio, AWS SNS and a logging provider, chosen once at startup
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis OTP storage (default)
//! - `twilio-sms`: Enable Twilio SMS service (default)
//! - `aws-sns`: Enable AWS SNS SMS service (default)

use sp_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// SMS service module - External SMS providers
pub mod sms;

/// Cache module - Redis OTP storage
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Stored data could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}

// Infrastructure details stay in the logs; callers see a generic internal error
impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::Internal {
            message: error.to_string(),
        }
    }
}
