//! AWS SNS SMS Service Implementation
//!
//! Direct-to-phone publishing through SNS. Every message carries the
//! `AWS.SNS.SMS.SenderID` and `AWS.SNS.SMS.SMSType` attributes.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sns::{config::Region, types::MessageAttributeValue, Client as SnsClient};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use sp_shared::config::AwsSnsSettings;

use crate::{
    sms::sms_service::{mask_phone_number, normalize_e164, SmsService},
    InfrastructureError,
};

/// AWS SNS SMS service configuration
#[derive(Debug, Clone)]
pub struct AwsSnsConfig {
    /// AWS Access Key ID
    pub access_key_id: String,
    /// AWS Secret Access Key
    pub secret_access_key: String,
    /// AWS Region (e.g., "ap-south-1")
    pub region: String,
    /// Alphanumeric sender ID shown on the handset
    pub sender_id: String,
    /// SMS type: "Transactional" or "Promotional"
    pub sms_type: String,
    /// Maximum publish attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
}

impl AwsSnsConfig {
    /// Build from the shared credentials, checking the SMS type
    pub fn from_settings(settings: &AwsSnsSettings) -> Result<Self, InfrastructureError> {
        if settings.sms_type != "Transactional" && settings.sms_type != "Promotional" {
            return Err(InfrastructureError::Config(
                "AWS_SNS_SMS_TYPE must be either 'Transactional' or 'Promotional'".to_string(),
            ));
        }

        Ok(Self {
            access_key_id: settings.access_key_id.clone(),
            secret_access_key: settings.secret_access_key.clone(),
            region: settings.region.clone(),
            sender_id: settings.sender_id.clone(),
            sms_type: settings.sms_type.clone(),
            max_retries: 2,
            retry_delay_ms: 500,
        })
    }
}

/// AWS SNS SMS service implementation
pub struct AwsSnsSmsService {
    client: SnsClient,
    config: AwsSnsConfig,
}

impl AwsSnsSmsService {
    /// Create a new AWS SNS SMS service
    pub async fn new(config: AwsSnsConfig) -> Result<Self, InfrastructureError> {
        let credentials_provider = aws_credential_types::Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "spendly_sms_service",
        );

        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials_provider)
            .load()
            .await;

        let client = SnsClient::new(&aws_config);

        info!(
            "AWS SNS SMS service initialized for region: {} (sender ID {})",
            config.region, config.sender_id
        );

        Ok(Self { client, config })
    }

    /// Message attributes attached to every publish
    fn create_sms_attributes(&self) -> Result<HashMap<String, MessageAttributeValue>, InfrastructureError> {
        let attribute = |value: &str| {
            MessageAttributeValue::builder()
                .data_type("String")
                .string_value(value)
                .build()
                .map_err(|e| InfrastructureError::Sms(format!("Invalid SNS message attribute: {}", e)))
        };

        let mut attributes = HashMap::new();
        attributes.insert("AWS.SNS.SMS.SenderID".to_string(), attribute(&self.config.sender_id)?);
        attributes.insert("AWS.SNS.SMS.SMSType".to_string(), attribute(&self.config.sms_type)?);
        Ok(attributes)
    }

    /// Send SMS with retry logic
    async fn send_with_retry(&self, to: &str, message: &str) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;
            debug!(
                "Sending SMS attempt {}/{} to {} via AWS SNS",
                attempts,
                self.config.max_retries,
                mask_phone_number(to)
            );

            let result = self
                .client
                .publish()
                .phone_number(to)
                .message(message)
                .set_message_attributes(Some(self.create_sms_attributes()?))
                .send()
                .await;

            match result {
                Ok(response) => {
                    let message_id = response.message_id().unwrap_or("unknown").to_string();
                    info!(
                        "SMS sent successfully to {} via AWS SNS with message ID: {}",
                        mask_phone_number(to),
                        message_id
                    );
                    return Ok(message_id);
                }
                Err(e) => {
                    error!(
                        "Failed to send SMS via AWS SNS (attempt {}/{}): {}",
                        attempts, self.config.max_retries, e
                    );

                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Sms(format!(
                            "Failed to send SMS via AWS SNS after {} attempts: {}",
                            attempts, e
                        )));
                    }

                    let error_msg = e.to_string();
                    if error_msg.contains("InvalidParameter")
                        || error_msg.contains("InvalidPhoneNumber")
                        || error_msg.contains("ValidationError")
                    {
                        return Err(InfrastructureError::Sms(format!(
                            "Invalid request to AWS SNS: {}",
                            e
                        )));
                    }
                    warn!("Retrying AWS SNS publish after {:?}", delay);

                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}

#[async_trait]
impl SmsService for AwsSnsSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let normalized_phone = normalize_e164(phone_number)?;

        info!(
            "Sending SMS to {} via AWS SNS (message length: {} chars)",
            mask_phone_number(&normalized_phone),
            message.len()
        );

        self.send_with_retry(&normalized_phone, message).await
    }

    fn provider_name(&self) -> &str {
        "aws-sns"
    }
}
