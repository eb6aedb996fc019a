//! Domain-specific error types for OTP recovery, authentication and input validation
//!
//! The `Display` text of each variant is the user-facing message returned by
//! the HTTP layer, so wording changes here are API changes.

use thiserror::Error;

/// One-time password lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Please wait {} before requesting another OTP", human_wait(*cooldown_seconds))]
    CooldownActive {
        cooldown_seconds: i64,
        retry_after_seconds: i64,
    },

    #[error("OTP not found or expired. Please request a new OTP.")]
    NotFound,

    #[error("OTP has expired. Please request a new OTP.")]
    Expired,

    #[error("Too many failed attempts. Please request a new OTP.")]
    AttemptsExceeded,

    #[error("Invalid OTP. {remaining} attempts remaining.")]
    InvalidCode { remaining: u32 },

    #[error("OTP verification required. Please verify OTP first.")]
    NotVerified,

    #[error("OTP verification expired. Please request a new OTP.")]
    VerificationExpired,

    #[error("Unable to send OTP. Please check your phone number and try again later.")]
    DeliveryFailed,
}

/// Account and credential errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid phone number format. Please enter a valid 10-digit Indian mobile number.")]
    InvalidPhoneFormat,

    #[error("Phone number not registered. Please register first.")]
    PhoneNotRegistered,

    #[error("User with this email or phone number already exists")]
    UserAlreadyExists,

    #[error("Email or password is incorrect")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{message}")]
    MissingFields { message: String },

    #[error("OTP must be a 6-digit number")]
    InvalidOtpFormat,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Please provide a valid email address")]
    InvalidEmail,
}

impl ValidationError {
    /// Build a "required" error naming the missing inputs
    ///
    /// `missing(&["Email", "password"])` reads "Email and password are required".
    pub fn missing(fields: &[&str]) -> Self {
        let verb = if fields.len() > 1 { "are" } else { "is" };
        Self::MissingFields {
            message: format!("{} {} required", fields.join(" and "), verb),
        }
    }
}

/// Render a cooldown as the shortest natural phrase ("1 minute", "90 seconds")
fn human_wait(seconds: i64) -> String {
    match seconds {
        60 => "1 minute".to_string(),
        s if s > 60 && s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "1 second".to_string(),
        s => format!("{} seconds", s),
    }
}
