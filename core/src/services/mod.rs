//! Business services containing domain logic and use cases.

pub mod auth;
pub mod otp;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthOutcome, AuthService, AuthServiceConfig, Registration};
pub use otp::{
    DeliveryChannel, DeliveryError, DeliveryReceipt, OtpDispatch, OtpService, OtpServiceConfig,
    SmsSender,
};
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use token::{Claims, JwtTokenIssuer, TokenIssuer, TokenServiceConfig};
