//! User repository trait defining the interface for user data persistence.
//!
//! The OTP and authentication services only ever address users by phone or
//! email, so the contract is keyed the same way.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find any user owning either the email or the phone number
    ///
    /// # Returns
    /// * `Ok(Some(User))` - At least one user matches; which one is unspecified
    /// * `Ok(None)` - Neither value is registered
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_phone_or_email(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Find a user by their 10-digit phone number
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Replace the password digest of the user owning `phone`
    ///
    /// # Returns
    /// * `Ok(rows)` - Number of users updated; `0` when nobody owns the phone
    /// * `Err(DomainError)` - Storage error occurred
    async fn update_password_by_phone(
        &self,
        phone: &str,
        password_hash: &str,
    ) -> Result<u64, DomainError>;

    /// Insert a new user and return the assigned id
    ///
    /// Implementations must reject a duplicate email or phone atomically with
    /// `AuthError::UserAlreadyExists`, even when a prior lookup found nothing.
    async fn insert_user(&self, user: NewUser) -> Result<i64, DomainError>;
}
