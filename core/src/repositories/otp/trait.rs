//! OTP store trait: keyed persistence for the live record of each phone.

use async_trait::async_trait;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

/// Key-value store for OTP records, keyed by the 10-digit phone number
///
/// Implementations need no cross-call atomicity: callers serialise every
/// read-modify-write for one phone before touching the store.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Fetch the live record for a phone, if any
    async fn get(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError>;

    /// Insert or overwrite the record for a phone
    async fn set(&self, phone: &str, record: &OtpRecord) -> Result<(), DomainError>;

    /// Remove the record for a phone; removing a missing record is not an error
    async fn delete(&self, phone: &str) -> Result<(), DomainError>;
}
