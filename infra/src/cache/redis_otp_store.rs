//! Redis implementation of the core `OtpStore`
//!
//! Each record is stored as JSON under `{key_prefix}{phone}` with an expiry
//! long enough to cover the code lifetime plus the post-verification window,
//! so Redis drops abandoned records on its own.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::{debug, info};

use sp_core::domain::entities::otp_record::OtpRecord;
use sp_core::errors::DomainError;
use sp_core::repositories::OtpStore;
use sp_shared::phone::mask_phone_number;
use sp_shared::CacheConfig;

use crate::InfrastructureError;

pub struct RedisOtpStore {
    connection: MultiplexedConnection,
    key_prefix: String,
    retention_seconds: u64,
}

impl RedisOtpStore {
    /// Connect to Redis
    ///
    /// # Arguments
    ///
    /// * `config` - Redis URL, connect timeout and key prefix
    /// * `retention` - How long an untouched record may live
    pub async fn connect(config: &CacheConfig, retention: Duration) -> Result<Self, InfrastructureError> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection = tokio::time::timeout(
            Duration::from_secs(config.connection_timeout),
            client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| {
            InfrastructureError::Config(format!(
                "Timed out connecting to Redis after {}s",
                config.connection_timeout
            ))
        })??;

        info!(
            key_prefix = %config.key_prefix,
            retention_seconds = retention.as_secs(),
            "Connected Redis OTP store"
        );

        Ok(Self {
            connection,
            key_prefix: config.key_prefix.clone(),
            retention_seconds: retention_seconds(retention),
        })
    }

    fn key(&self, phone: &str) -> String {
        format_key(&self.key_prefix, phone)
    }
}

fn format_key(prefix: &str, phone: &str) -> String {
    format!("{}{}", prefix, phone)
}

/// Redis rejects a zero expiry
fn retention_seconds(retention: Duration) -> u64 {
    retention.as_secs().max(1)
}

fn encode(record: &OtpRecord) -> Result<String, InfrastructureError> {
    Ok(serde_json::to_string(record)?)
}

fn decode(raw: &str) -> Result<OtpRecord, InfrastructureError> {
    Ok(serde_json::from_str(raw)?)
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn get(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError> {
        let mut connection = self.connection.clone();
        let raw: Option<String> = connection
            .get(self.key(phone))
            .await
            .map_err(InfrastructureError::from)?;

        match raw {
            Some(raw) => Ok(Some(decode(&raw)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, phone: &str, record: &OtpRecord) -> Result<(), DomainError> {
        let mut connection = self.connection.clone();
        connection
            .set_ex::<_, _, ()>(self.key(phone), encode(record)?, self.retention_seconds)
            .await
            .map_err(InfrastructureError::from)?;

        debug!(phone = %mask_phone_number(phone), "Stored OTP record in Redis");
        Ok(())
    }

    async fn delete(&self, phone: &str) -> Result<(), DomainError> {
        let mut connection = self.connection.clone();
        let _: u32 = connection
            .del(self.key(phone))
            .await
            .map_err(InfrastructureError::from)?;
        Ok(())
    }
}
