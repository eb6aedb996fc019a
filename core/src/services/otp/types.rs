//! Types for OTP delivery results

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a code reached (or would reach) the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryChannel {
    /// Sent through a real SMS gateway
    Sms,
    /// Written to the server log only
    Console,
}

impl DeliveryChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryChannel::Sms => "sms",
            DeliveryChannel::Console => "console",
        }
    }
}

impl std::fmt::Display for DeliveryChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider acknowledgement of an accepted message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Provider name (e.g. `twilio`, `aws-sns`, `console`)
    pub provider: String,
    pub channel: DeliveryChannel,
    /// Provider-side message id, when one is returned
    pub message_id: Option<String>,
}

/// Provider refused or failed to accept a message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{provider} delivery failed: {reason}")]
pub struct DeliveryError {
    pub provider: String,
    pub reason: String,
}

impl DeliveryError {
    pub fn new(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}

/// Result of a successful OTP issuance; never carries the code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpDispatch {
    pub channel: DeliveryChannel,
    /// Provider that accepted the message
    pub provider: String,
}
