//! Process-local OTP store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

use super::r#trait::OtpStore;

/// OTP store backed by a `HashMap`
///
/// Expiry is enforced by the OTP service from the record timestamps, so
/// stale entries stay here until the next operation on their phone.
#[derive(Clone, Default)]
pub struct InMemoryOtpStore {
    records: Arc<RwLock<HashMap<String, OtpRecord>>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn get(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError> {
        Ok(self.records.read().await.get(phone).cloned())
    }

    async fn set(&self, phone: &str, record: &OtpRecord) -> Result<(), DomainError> {
        self.records
            .write()
            .await
            .insert(phone.to_string(), record.clone());
        Ok(())
    }

    async fn delete(&self, phone: &str) -> Result<(), DomainError> {
        self.records.write().await.remove(phone);
        Ok(())
    }
}
