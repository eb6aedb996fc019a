//! OTP record store module.

mod r#trait;
pub use r#trait::OtpStore;

mod memory;
pub use memory::InMemoryOtpStore;
