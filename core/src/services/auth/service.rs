//! Main authentication service implementation

use std::sync::Arc;

use sp_shared::phone::{is_valid_email, is_valid_mobile_number, mask_phone_number};

use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::password::PasswordHasher;
use crate::services::token::TokenIssuer;

use super::config::AuthServiceConfig;

/// Input for creating an account
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub phone: String,
}

/// A signed session token and the account it belongs to
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub token: String,
    pub user: User,
}

/// Authentication service for registration and login
pub struct AuthService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    /// User repository for account persistence
    users: Arc<U>,
    /// Password hashing and verification
    password_hasher: Arc<H>,
    /// Session token signing
    tokens: Arc<T>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, H, T> AuthService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `users` - Repository for user data persistence
    /// * `password_hasher` - Hasher for stored passwords
    /// * `tokens` - Issuer for session tokens
    /// * `config` - Service configuration
    pub fn new(users: Arc<U>, password_hasher: Arc<H>, tokens: Arc<T>, config: AuthServiceConfig) -> Self {
        Self {
            users,
            password_hasher,
            tokens,
            config,
        }
    }

    /// Create an account and sign a token for it
    ///
    /// Validation runs before any lookup: email and password present, phone
    /// present, email shape, phone pattern, password length. An email or
    /// phone already on record yields `UserAlreadyExists`.
    pub async fn register(&self, registration: Registration) -> DomainResult<AuthOutcome> {
        let Registration {
            email,
            password,
            name,
            phone,
        } = registration;

        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::missing(&["Email", "password"]).into());
        }
        if phone.is_empty() {
            return Err(ValidationError::missing(&["Phone number"]).into());
        }
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if !is_valid_mobile_number(&phone) {
            return Err(AuthError::InvalidPhoneFormat.into());
        }
        if password.chars().count() < self.config.min_password_length {
            return Err(ValidationError::PasswordTooShort {
                min: self.config.min_password_length,
            }
            .into());
        }

        if self.users.find_by_phone_or_email(&email, &phone).await?.is_some() {
            tracing::info!(
                phone = %mask_phone_number(&phone),
                event = "registration_conflict",
                "Registration rejected for an existing email or phone"
            );
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.password_hasher.hash(&password).await?;
        let new_user = NewUser {
            email,
            name: name.unwrap_or_default(),
            phone,
            password_hash,
        };

        // The repository re-checks uniqueness atomically, so a racing
        // registration still ends in UserAlreadyExists
        let id = self.users.insert_user(new_user.clone()).await?;
        let user = match self.users.find_by_email(&new_user.email).await? {
            Some(user) => user,
            None => new_user.into_user(id, chrono::Utc::now()),
        };

        let token = self.tokens.issue(user.id, &user.email)?;

        tracing::info!(
            user_id = user.id,
            phone = %mask_phone_number(&user.phone),
            event = "user_registered",
            "User registered"
        );

        Ok(AuthOutcome { token, user })
    }

    /// Check an email/password pair and sign a token
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthOutcome> {
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::missing(&["Email", "password"]).into());
        }

        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::info!(event = "login_failed", reason = "unknown_email", "Login rejected");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.password_hasher.verify(password, &user.password_hash).await? {
            tracing::info!(
                user_id = user.id,
                event = "login_failed",
                reason = "password_mismatch",
                "Login rejected"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.tokens.issue(user.id, &user.email)?;
        tracing::info!(user_id = user.id, event = "user_logged_in", "User logged in");

        Ok(AuthOutcome { token, user })
    }
}
