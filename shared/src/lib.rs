//! Shared utilities and common types for the Spendly server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the process environment
//! - The JSON error envelope and machine-readable error codes
//! - Phone number and input format utilities

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AuthConfig, CacheConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, OtpConfig, PasswordConfig, ServerConfig, SmsConfig, SmsProviderKind,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::phone;
