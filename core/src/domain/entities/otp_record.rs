//! OTP record entity: the per-phone state of an issued one-time password.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default number of failed submissions before the code is invalidated
pub const MAX_ATTEMPTS: u32 = 3;

/// Default code lifetime (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// State of the live OTP for one phone number
///
/// Holds only a digest of the code. `verified` moves from false to true at
/// most once and `verified_at` keeps the time of that first transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Hex digest of the code, never the code itself
    pub code_hash: String,

    /// Id of the user this code was issued to
    pub owner_id: i64,

    /// Issuance time; records written by older deployments may lack it
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    pub expires_at: DateTime<Utc>,

    /// Failed verification submissions since issuance
    #[serde(default)]
    pub attempts: u32,

    #[serde(default)]
    pub verified: bool,

    #[serde(default)]
    pub verified_at: Option<DateTime<Utc>>,
}

impl OtpRecord {
    /// Create a fresh, unverified record
    pub fn issue(code_hash: String, owner_id: i64, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            code_hash,
            owner_id,
            created_at: Some(now),
            expires_at: now + ttl,
            attempts: 0,
            verified: false,
            verified_at: None,
        }
    }

    /// Checks if the code lifetime has passed
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Time left before another code may be issued for this phone
    ///
    /// `None` when the cooldown has elapsed or the issuance time is unknown.
    pub fn cooldown_remaining(&self, now: DateTime<Utc>, cooldown: Duration) -> Option<Duration> {
        let created_at = self.created_at?;
        let elapsed = now - created_at;
        if elapsed < cooldown {
            Some(cooldown - elapsed)
        } else {
            None
        }
    }

    /// Checks whether no further submissions are allowed
    pub fn attempts_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// Submissions left before the record is invalidated
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Count one failed submission, never past `max_attempts`
    pub fn record_failed_attempt(&mut self, max_attempts: u32) {
        if self.attempts < max_attempts {
            self.attempts += 1;
        }
    }

    /// Mark the code as verified; repeated calls keep the first timestamp
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        if !self.verified {
            self.verified = true;
            self.verified_at = Some(now);
        }
    }

    /// Checks whether a verified code may no longer gate a password reset
    ///
    /// A verified record without a verification time is treated as expired.
    pub fn verification_expired_at(&self, now: DateTime<Utc>, window: Duration) -> bool {
        match self.verified_at {
            Some(verified_at) => now - verified_at > window,
            None => true,
        }
    }
}
