//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, OtpError, ValidationError};

use sp_shared::error_codes;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Coarse failure classes; the HTTP layer maps these to status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    RateLimit,
    Expired,
    AttemptsExceeded,
    InvalidCode,
    Unauthorized,
    Delivery,
    Conflict,
    Credential,
    Internal,
}

impl DomainError {
    /// Failure class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation { .. } | DomainError::ValidationErr(_) => ErrorKind::Validation,
            DomainError::Internal { .. } => ErrorKind::Internal,
            DomainError::Otp(err) => match err {
                OtpError::CooldownActive { .. } => ErrorKind::RateLimit,
                OtpError::NotFound => ErrorKind::NotFound,
                OtpError::Expired | OtpError::VerificationExpired => ErrorKind::Expired,
                OtpError::AttemptsExceeded => ErrorKind::AttemptsExceeded,
                OtpError::InvalidCode { .. } => ErrorKind::InvalidCode,
                OtpError::NotVerified => ErrorKind::Unauthorized,
                OtpError::DeliveryFailed => ErrorKind::Delivery,
            },
            DomainError::Auth(err) => match err {
                AuthError::InvalidPhoneFormat => ErrorKind::Validation,
                AuthError::PhoneNotRegistered | AuthError::UserNotFound => ErrorKind::NotFound,
                AuthError::UserAlreadyExists => ErrorKind::Conflict,
                AuthError::InvalidCredentials => ErrorKind::Credential,
            },
        }
    }

    /// Stable machine-readable code for the `error` field of responses
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::ValidationErr(err) => match err {
                ValidationError::MissingFields { .. } => error_codes::VALIDATION_ERROR,
                ValidationError::InvalidOtpFormat => error_codes::OTP_FORMAT_INVALID,
                ValidationError::PasswordTooShort { .. } => error_codes::PASSWORD_TOO_SHORT,
                ValidationError::InvalidEmail => error_codes::EMAIL_INVALID,
            },
            DomainError::Otp(err) => match err {
                OtpError::CooldownActive { .. } => error_codes::OTP_COOLDOWN_ACTIVE,
                OtpError::NotFound => error_codes::OTP_NOT_FOUND,
                OtpError::Expired => error_codes::OTP_EXPIRED,
                OtpError::VerificationExpired => error_codes::OTP_VERIFICATION_EXPIRED,
                OtpError::AttemptsExceeded => error_codes::OTP_ATTEMPTS_EXCEEDED,
                OtpError::InvalidCode { .. } => error_codes::OTP_INVALID,
                OtpError::NotVerified => error_codes::OTP_NOT_VERIFIED,
                OtpError::DeliveryFailed => error_codes::SMS_DELIVERY_FAILED,
            },
            DomainError::Auth(err) => match err {
                AuthError::InvalidPhoneFormat => error_codes::PHONE_INVALID,
                AuthError::PhoneNotRegistered => error_codes::PHONE_NOT_REGISTERED,
                AuthError::UserAlreadyExists => error_codes::USER_ALREADY_EXISTS,
                AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
                AuthError::UserNotFound => error_codes::USER_NOT_FOUND,
            },
        }
    }

    /// Message safe to show to clients; internal details are never exposed
    pub fn public_message(&self) -> String {
        match self {
            DomainError::Internal { .. } => "Internal server error".to_string(),
            DomainError::Validation { message } => message.clone(),
            other => other.to_string(),
        }
    }
}
