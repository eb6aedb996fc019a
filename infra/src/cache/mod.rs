//! Cache module for Redis-backed OTP storage

pub mod redis_otp_store;

pub use redis_otp_store::RedisOtpStore;

// Re-export commonly used types
pub use sp_shared::CacheConfig;
