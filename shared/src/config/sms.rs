//! SMS provider selection and credentials

use serde::{Deserialize, Serialize};

use super::env_var;

/// Which SMS provider the process should use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmsProviderKind {
    /// Pick from the available credentials and the environment
    #[default]
    Auto,
    Twilio,
    AwsSns,
    /// Write messages to the log instead of sending them
    Console,
}

impl std::str::FromStr for SmsProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(SmsProviderKind::Auto),
            "twilio" => Ok(SmsProviderKind::Twilio),
            "aws-sns" | "aws_sns" | "sns" | "aws" => Ok(SmsProviderKind::AwsSns),
            "console" | "log" | "mock" => Ok(SmsProviderKind::Console),
            _ => Err(format!("Invalid SMS provider: {}", s)),
        }
    }
}

impl std::fmt::Display for SmsProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SmsProviderKind::Auto => write!(f, "auto"),
            SmsProviderKind::Twilio => write!(f, "twilio"),
            SmsProviderKind::AwsSns => write!(f, "aws-sns"),
            SmsProviderKind::Console => write!(f, "console"),
        }
    }
}

/// Twilio credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TwilioSettings {
    pub account_sid: String,
    #[serde(skip_serializing)]
    pub auth_token: String,
    /// Sender number in E.164 format
    pub from_number: String,
}

/// AWS SNS credentials and message attributes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AwsSnsSettings {
    pub access_key_id: String,
    #[serde(skip_serializing)]
    pub secret_access_key: String,
    pub region: String,
    pub sender_id: String,
    pub sms_type: String,
}

/// SMS configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Requested provider
    pub provider: SmsProviderKind,

    /// Present only when every Twilio variable is set
    pub twilio: Option<TwilioSettings>,

    /// Present only when both AWS keys are set
    pub aws_sns: Option<AwsSnsSettings>,
}

impl SmsConfig {
    /// Create from environment variables
    ///
    /// An unparsable `SMS_PROVIDER` is an error rather than a silent fallback.
    pub fn from_env() -> Result<Self, String> {
        let provider = match env_var("SMS_PROVIDER") {
            Some(value) => value.parse()?,
            None => SmsProviderKind::Auto,
        };

        let twilio = match (
            env_var("TWILIO_ACCOUNT_SID"),
            env_var("TWILIO_AUTH_TOKEN"),
            env_var("TWILIO_PHONE_NUMBER"),
        ) {
            (Some(account_sid), Some(auth_token), Some(from_number)) => Some(TwilioSettings {
                account_sid,
                auth_token,
                from_number,
            }),
            _ => None,
        };

        let aws_sns = match (env_var("AWS_ACCESS_KEY_ID"), env_var("AWS_SECRET_ACCESS_KEY")) {
            (Some(access_key_id), Some(secret_access_key)) => Some(AwsSnsSettings {
                access_key_id,
                secret_access_key,
                region: env_var("AWS_REGION").unwrap_or_else(|| "ap-south-1".to_string()),
                sender_id: env_var("AWS_SNS_SENDER_ID").unwrap_or_else(|| "SPENDLY".to_string()),
                sms_type: env_var("AWS_SNS_SMS_TYPE")
                    .unwrap_or_else(|| "Transactional".to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            provider,
            twilio,
            aws_sns,
        })
    }
}
