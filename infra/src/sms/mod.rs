//! SMS Service Module
//!
//! SMS delivery for OTP codes. One provider is chosen at startup from
//! [`SmsConfig`] and the running [`Environment`]; there is no per-message
//! branching or failover.

pub mod adapter;
pub mod logging_sms;
pub mod sms_service;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

// AWS SNS SMS service (feature-gated)
#[cfg(feature = "aws-sns")]
pub mod aws_sns;

// Re-export commonly used types
pub use adapter::SmsServiceAdapter;
pub use logging_sms::{LoggingMode, LoggingSmsService};
pub use sms_service::{mask_phone_number, normalize_e164, SmsService};

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

#[cfg(feature = "aws-sns")]
pub use aws_sns::{AwsSnsConfig, AwsSnsSmsService};

use sp_shared::{Environment, SmsConfig, SmsProviderKind};

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create the SMS provider for this process
///
/// An explicit provider must be buildable or start-up fails. `auto` picks,
/// in production, Twilio then AWS SNS by available credentials and otherwise
/// a refusing logging provider; outside production it always logs.
pub async fn create_sms_service(
    config: &SmsConfig,
    environment: Environment,
) -> Result<Box<dyn SmsService>, InfrastructureError> {
    match config.provider {
        SmsProviderKind::Twilio => build_twilio(config),
        SmsProviderKind::AwsSns => build_aws_sns(config).await,
        SmsProviderKind::Console => {
            if environment.is_production() {
                tracing::warn!("SMS_PROVIDER=console in production; OTP codes will only be logged");
            }
            Ok(Box::new(LoggingSmsService::delivering()))
        }
        SmsProviderKind::Auto if !environment.is_production() => {
            Ok(Box::new(LoggingSmsService::delivering()))
        }
        SmsProviderKind::Auto => {
            if config.twilio.is_some() && cfg!(feature = "twilio-sms") {
                return build_twilio(config);
            }
            if config.aws_sns.is_some() && cfg!(feature = "aws-sns") {
                return build_aws_sns(config).await;
            }
            tracing::error!(
                "No SMS provider configured for production; OTP requests will fail until TWILIO_* or AWS_* variables are set"
            );
            Ok(Box::new(LoggingSmsService::refusing()))
        }
    }
}

#[cfg(feature = "twilio-sms")]
fn build_twilio(config: &SmsConfig) -> Result<Box<dyn SmsService>, InfrastructureError> {
    let settings = config.twilio.as_ref().ok_or_else(|| {
        InfrastructureError::Config(
            "Twilio requires TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN and TWILIO_PHONE_NUMBER".to_string(),
        )
    })?;
    let service = TwilioSmsService::new(TwilioConfig::from_settings(settings)?)?;
    Ok(Box::new(service))
}

#[cfg(not(feature = "twilio-sms"))]
fn build_twilio(_config: &SmsConfig) -> Result<Box<dyn SmsService>, InfrastructureError> {
    Err(InfrastructureError::Config(
        "Twilio support is not compiled in (enable the twilio-sms feature)".to_string(),
    ))
}

#[cfg(feature = "aws-sns")]
async fn build_aws_sns(config: &SmsConfig) -> Result<Box<dyn SmsService>, InfrastructureError> {
    let settings = config.aws_sns.as_ref().ok_or_else(|| {
        InfrastructureError::Config(
            "AWS SNS requires AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY".to_string(),
        )
    })?;
    let service = AwsSnsSmsService::new(AwsSnsConfig::from_settings(settings)?).await?;
    Ok(Box::new(service))
}

#[cfg(not(feature = "aws-sns"))]
async fn build_aws_sns(_config: &SmsConfig) -> Result<Box<dyn SmsService>, InfrastructureError> {
    Err(InfrastructureError::Config(
        "AWS SNS support is not compiled in (enable the aws-sns feature)".to_string(),
    ))
}
