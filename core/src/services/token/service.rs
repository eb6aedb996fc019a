//! JWT issuance

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

use super::config::TokenServiceConfig;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub email: String,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Issues signed session tokens
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: i64, email: &str) -> DomainResult<String>;
}

/// HS256 token issuer
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    expiry: Duration,
}

impl JwtTokenIssuer {
    /// Creates a new issuer from the signing secret and lifetime
    pub fn new(config: TokenServiceConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            expiry: Duration::seconds(config.expiry_seconds),
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: i64, email: &str) -> DomainResult<String> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to sign token: {}", e),
            }
        })
    }
}
