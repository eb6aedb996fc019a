//! Trait for SMS delivery integration

use async_trait::async_trait;

use super::types::{DeliveryError, DeliveryReceipt};

/// Outbound SMS primitive used by the OTP service
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send `message` to `destination` (international format, e.g. `+919876543210`)
    async fn send(&self, destination: &str, message: &str) -> Result<DeliveryReceipt, DeliveryError>;

    /// Name of the underlying provider, for logs
    fn provider_name(&self) -> &str;
}
