//! SMS service trait shared by every provider

use async_trait::async_trait;
use phonenumber::{Mode, PhoneNumber};

use sp_core::services::DeliveryChannel;

use crate::InfrastructureError;

pub use sp_shared::phone::mask_phone_number;

/// Outbound SMS provider
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send a message to an E.164 destination
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Provider message id
    /// * `Err(InfrastructureError)` - If the provider rejected or never received the message
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Short provider identifier used in logs and receipts
    fn provider_name(&self) -> &str;

    /// How the message reaches the user
    fn channel(&self) -> DeliveryChannel {
        DeliveryChannel::Sms
    }

    /// Whether the provider is expected to accept messages
    async fn is_available(&self) -> bool {
        true
    }
}

/// Validate and normalize a destination to E.164
pub fn normalize_e164(phone: &str) -> Result<String, InfrastructureError> {
    if !phone.starts_with('+') {
        return Err(InfrastructureError::Sms(
            "Phone number must be in E.164 format (e.g., +919876543210)".to_string(),
        ));
    }
    phone
        .parse::<PhoneNumber>()
        .map(|parsed| parsed.format().mode(Mode::E164).to_string())
        .map_err(|e| InfrastructureError::Sms(format!("Invalid phone number format: {}", e)))
}
