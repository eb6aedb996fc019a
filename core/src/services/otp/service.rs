//! Main OTP service implementation

use chrono::Utc;
use std::sync::Arc;

use sp_shared::phone::{is_valid_mobile_number, is_valid_otp_code, mask_phone_number, to_international};

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::{AuthError, DomainResult, OtpError, ValidationError};
use crate::repositories::{OtpStore, UserRepository};
use crate::services::password::PasswordHasher;

use super::code::{generate_code, CodeHasher};
use super::config::OtpServiceConfig;
use super::locks::PhoneLocks;
use super::traits::SmsSender;
use super::types::OtpDispatch;

/// OTP lifecycle manager for phone-based password recovery
///
/// Every operation that reads and then writes the record of a phone runs
/// while holding that phone's lock, so concurrent requests for one phone
/// observe each other's writes in order.
pub struct OtpService<U, O, S, H>
where
    U: UserRepository + ?Sized,
    O: OtpStore + ?Sized,
    S: SmsSender + ?Sized,
    H: PasswordHasher + ?Sized,
{
    /// User lookup and password updates
    users: Arc<U>,
    /// Live OTP records
    store: Arc<O>,
    /// Outbound SMS
    sms: Arc<S>,
    /// Hashing for the new password
    password_hasher: Arc<H>,
    code_hasher: CodeHasher,
    locks: PhoneLocks,
    config: OtpServiceConfig,
}

impl<U, O, S, H> OtpService<U, O, S, H>
where
    U: UserRepository + ?Sized,
    O: OtpStore + ?Sized,
    S: SmsSender + ?Sized,
    H: PasswordHasher + ?Sized,
{
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `users` - User repository used for ownership checks and password updates
    /// * `store` - OTP record store
    /// * `sms` - SMS sender used to deliver codes
    /// * `password_hasher` - Hasher applied to the new password on reset
    /// * `config` - Service configuration
    pub fn new(
        users: Arc<U>,
        store: Arc<O>,
        sms: Arc<S>,
        password_hasher: Arc<H>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            users,
            store,
            sms,
            password_hasher,
            code_hasher: CodeHasher::new(config.hash_secret.clone()),
            locks: PhoneLocks::new(),
            config,
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue a new code for a registered phone and send it by SMS
    ///
    /// Checks, in order: phone format, resend cooldown, phone ownership.
    /// The record is written before delivery and removed again if delivery
    /// fails or exceeds the configured timeout.
    ///
    /// # Returns
    ///
    /// * `Ok(OtpDispatch)` - Channel and provider that accepted the message
    /// * `Err(DomainError)` - Validation, cooldown, unknown phone or delivery failure
    pub async fn request_otp(&self, phone: &str) -> DomainResult<OtpDispatch> {
        if !is_valid_mobile_number(phone) {
            return Err(AuthError::InvalidPhoneFormat.into());
        }
        let masked = mask_phone_number(phone);

        let _guard = self.locks.acquire(phone).await;
        let now = Utc::now();

        if let Some(existing) = self.store.get(phone).await? {
            if existing.created_at.is_none() {
                tracing::warn!(
                    phone = %masked,
                    event = "otp_record_missing_created_at",
                    "Existing OTP record has no issuance time; cooldown not applied"
                );
            }
            if let Some(remaining) = existing.cooldown_remaining(now, self.config.resend_cooldown) {
                // Round up so clients never retry a moment too early
                let retry_after_seconds = (remaining.num_milliseconds() + 999) / 1000;
                tracing::warn!(
                    phone = %masked,
                    retry_after_seconds = retry_after_seconds,
                    event = "rate_limit_exceeded",
                    "OTP requested again within the cooldown window"
                );
                return Err(OtpError::CooldownActive {
                    cooldown_seconds: self.config.resend_cooldown.num_seconds(),
                    retry_after_seconds: retry_after_seconds.max(1),
                }
                .into());
            }
        }

        let user = match self.users.find_by_phone(phone).await? {
            Some(user) => user,
            None => {
                tracing::info!(
                    phone = %masked,
                    event = "otp_unregistered_phone",
                    "OTP requested for a phone with no account"
                );
                return Err(AuthError::PhoneNotRegistered.into());
            }
        };

        let code = generate_code();
        let record = OtpRecord::issue(
            self.code_hasher.digest(phone, &code),
            user.id,
            now,
            self.config.code_ttl,
        );
        self.store.set(phone, &record).await?;

        tracing::info!(
            phone = %masked,
            user_id = user.id,
            event = "otp_generated",
            "Generated new OTP for password recovery"
        );

        let destination = to_international(&self.config.country_prefix, phone);
        let message = self.compose_message(&code);
        let outcome =
            tokio::time::timeout(self.config.delivery_timeout, self.sms.send(&destination, &message)).await;

        let failure = match outcome {
            Ok(Ok(receipt)) => {
                tracing::info!(
                    phone = %masked,
                    provider = %receipt.provider,
                    channel = %receipt.channel,
                    message_id = receipt.message_id.as_deref().unwrap_or("-"),
                    event = "otp_sent",
                    "OTP delivered to provider"
                );
                return Ok(OtpDispatch {
                    channel: receipt.channel,
                    provider: receipt.provider,
                });
            }
            Ok(Err(e)) => e.to_string(),
            Err(_) => format!(
                "{} did not respond within {:?}",
                self.sms.provider_name(),
                self.config.delivery_timeout
            ),
        };

        tracing::error!(
            phone = %masked,
            provider = self.sms.provider_name(),
            error = %failure,
            event = "otp_delivery_failed",
            "SMS delivery failed; discarding issued OTP"
        );
        if let Err(e) = self.store.delete(phone).await {
            tracing::error!(
                phone = %masked,
                error = %e,
                event = "otp_rollback_failed",
                "Failed to remove undelivered OTP"
            );
        }

        Err(OtpError::DeliveryFailed.into())
    }

    /// Check a submitted code
    ///
    /// First failure wins: code format, missing record, expiry, exhausted
    /// attempts, digest mismatch. Expiry and exhaustion delete the record;
    /// a mismatch consumes one attempt. On success the record is kept,
    /// verified, for [`reset_password`](Self::reset_password).
    pub async fn verify_otp(&self, phone: &str, code: &str) -> DomainResult<()> {
        if !is_valid_otp_code(code) {
            return Err(ValidationError::InvalidOtpFormat.into());
        }
        let masked = mask_phone_number(phone);

        let _guard = self.locks.acquire(phone).await;
        let now = Utc::now();

        let mut record = match self.store.get(phone).await? {
            Some(record) => record,
            None => {
                tracing::info!(phone = %masked, event = "otp_not_found", "No OTP on record");
                return Err(OtpError::NotFound.into());
            }
        };

        if record.is_expired_at(now) {
            self.store.delete(phone).await?;
            tracing::info!(phone = %masked, event = "otp_expired", "OTP expired before verification");
            return Err(OtpError::Expired.into());
        }

        if record.attempts_exhausted(self.config.max_attempts) {
            self.store.delete(phone).await?;
            tracing::warn!(
                phone = %masked,
                event = "max_attempts_exceeded",
                "OTP invalidated after too many failed attempts"
            );
            return Err(OtpError::AttemptsExceeded.into());
        }

        if !self.code_hasher.matches(phone, code, &record.code_hash) {
            record.record_failed_attempt(self.config.max_attempts);
            self.store.set(phone, &record).await?;
            let remaining = record.remaining_attempts(self.config.max_attempts);
            tracing::warn!(
                phone = %masked,
                attempts = record.attempts,
                remaining_attempts = remaining,
                event = "otp_verification_failed",
                "Submitted OTP did not match"
            );
            return Err(OtpError::InvalidCode { remaining }.into());
        }

        record.mark_verified(now);
        self.store.set(phone, &record).await?;

        tracing::info!(
            phone = %masked,
            user_id = record.owner_id,
            event = "otp_verified_success",
            "OTP verified"
        );
        Ok(())
    }

    /// Set a new password for the owner of a recently verified code
    ///
    /// The record is consumed on success, so one verification authorises
    /// exactly one reset.
    pub async fn reset_password(&self, phone: &str, new_password: &str) -> DomainResult<()> {
        if new_password.chars().count() < self.config.min_password_length {
            return Err(ValidationError::PasswordTooShort {
                min: self.config.min_password_length,
            }
            .into());
        }
        let masked = mask_phone_number(phone);

        let _guard = self.locks.acquire(phone).await;
        let now = Utc::now();

        let record = match self.store.get(phone).await? {
            Some(record) if record.verified => record,
            _ => {
                tracing::warn!(
                    phone = %masked,
                    event = "password_reset_unverified",
                    "Password reset attempted without a verified OTP"
                );
                return Err(OtpError::NotVerified.into());
            }
        };

        if record.verification_expired_at(now, self.config.verification_window) {
            self.store.delete(phone).await?;
            tracing::info!(
                phone = %masked,
                event = "otp_verification_expired",
                "Verified OTP was not used within the reset window"
            );
            return Err(OtpError::VerificationExpired.into());
        }

        let password_hash = self.password_hasher.hash(new_password).await?;
        let updated = self
            .users
            .update_password_by_phone(phone, &password_hash)
            .await?;
        if updated == 0 {
            tracing::warn!(
                phone = %masked,
                user_id = record.owner_id,
                event = "password_reset_user_missing",
                "Account disappeared between verification and reset"
            );
            return Err(AuthError::UserNotFound.into());
        }

        self.store.delete(phone).await?;

        tracing::info!(
            phone = %masked,
            user_id = record.owner_id,
            event = "password_reset",
            "Password reset through OTP recovery"
        );
        Ok(())
    }

    fn compose_message(&self, code: &str) -> String {
        format!(
            "Your Spendly OTP is {}. Valid for {} minutes. Do not share this code.",
            code,
            self.config.ttl_minutes()
        )
    }
}
