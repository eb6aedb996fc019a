//! Configuration for the authentication service

/// Minimum password length accepted at registration
pub const MIN_REGISTRATION_PASSWORD_LENGTH: usize = 6;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Minimum password length for new accounts
    pub min_password_length: usize,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            min_password_length: MIN_REGISTRATION_PASSWORD_LENGTH,
        }
    }
}
