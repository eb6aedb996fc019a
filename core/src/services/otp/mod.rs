//! OTP lifecycle module for phone-based password recovery
//!
//! This module owns every one-time password state transition:
//! - Code generation, digesting and SMS dispatch with rollback
//! - Verification with bounded attempts
//! - Gating a password reset on a recently verified code
//! - Per-phone serialisation of all of the above

mod code;
mod config;
mod locks;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use code::{generate_code, CodeHasher};
pub use config::OtpServiceConfig;
pub use locks::{PhoneGuard, PhoneLocks};
pub use service::OtpService;
pub use traits::SmsSender;
pub use types::{DeliveryChannel, DeliveryError, DeliveryReceipt, OtpDispatch};
