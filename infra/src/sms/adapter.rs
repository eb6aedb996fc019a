//! SMS Service Trait Adapter
//!
//! Bridges any infrastructure [`SmsService`] to the core `SmsSender` trait
//! used by the OTP service.

use async_trait::async_trait;
use std::sync::Arc;

use sp_core::services::{DeliveryError, DeliveryReceipt, SmsSender};

use crate::sms::sms_service::SmsService;

/// Adapter that implements the core `SmsSender` for an infrastructure provider
#[derive(Clone)]
pub struct SmsServiceAdapter {
    inner: Arc<dyn SmsService>,
}

impl SmsServiceAdapter {
    pub fn new(inner: Arc<dyn SmsService>) -> Self {
        Self { inner }
    }

    pub fn from_boxed(inner: Box<dyn SmsService>) -> Self {
        Self { inner: Arc::from(inner) }
    }
}

#[async_trait]
impl SmsSender for SmsServiceAdapter {
    async fn send(&self, destination: &str, message: &str) -> Result<DeliveryReceipt, DeliveryError> {
        match self.inner.send_sms(destination, message).await {
            Ok(message_id) => Ok(DeliveryReceipt {
                provider: self.inner.provider_name().to_string(),
                channel: self.inner.channel(),
                message_id: Some(message_id),
            }),
            Err(e) => Err(DeliveryError::new(self.inner.provider_name(), e.to_string())),
        }
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}
