//! SMS provider that writes messages to the log instead of sending them
//!
//! In development this is the delivery channel: the full message, code
//! included, is logged on the `sms_service` target. In production it stands
//! in for a missing provider and refuses every message, so OTP requests fail
//! loudly instead of pretending to deliver.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{info, warn};

use sp_core::services::DeliveryChannel;

use crate::sms::sms_service::{mask_phone_number, SmsService};
use crate::InfrastructureError;

/// What the logging provider does with a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// Log the message and report success
    Delivering,
    /// Report failure without logging the message body
    Refusing,
}

pub struct LoggingSmsService {
    mode: LoggingMode,
    message_count: AtomicUsize,
}

impl LoggingSmsService {
    pub fn new(mode: LoggingMode) -> Self {
        Self {
            mode,
            message_count: AtomicUsize::new(0),
        }
    }

    /// Development provider that accepts every message
    pub fn delivering() -> Self {
        Self::new(LoggingMode::Delivering)
    }

    /// Production placeholder that rejects every message
    pub fn refusing() -> Self {
        Self::new(LoggingMode::Refusing)
    }

    pub fn mode(&self) -> LoggingMode {
        self.mode
    }
}

#[async_trait]
impl SmsService for LoggingSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        match self.mode {
            LoggingMode::Delivering => {
                let sequence = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
                info!(
                    target: "sms_service",
                    to = phone_number,
                    "[DEV] SMS to {}: {}",
                    phone_number,
                    message
                );
                Ok(format!("console_{}", sequence))
            }
            LoggingMode::Refusing => {
                warn!(
                    target: "sms_service",
                    to = %mask_phone_number(phone_number),
                    "Production SMS not configured; add TWILIO_* or AWS_* environment variables"
                );
                Err(InfrastructureError::Sms(
                    "SMS service not configured for production".to_string(),
                ))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "console"
    }

    fn channel(&self) -> DeliveryChannel {
        DeliveryChannel::Console
    }

    async fn is_available(&self) -> bool {
        self.mode == LoggingMode::Delivering
    }
}
