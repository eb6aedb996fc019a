//! Password hashing
//!
//! bcrypt is CPU-bound, so both operations run on tokio's blocking pool.

use async_trait::async_trait;

use crate::errors::{DomainError, DomainResult};

/// One-way password hashing primitive
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password
    async fn hash(&self, plaintext: &str) -> DomainResult<String>;

    /// Check a plaintext password against a stored digest
    async fn verify(&self, plaintext: &str, digest: &str) -> DomainResult<bool>;
}

/// bcrypt implementation of [`PasswordHasher`]
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Creates a hasher with the given work factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, plaintext: &str) -> DomainResult<String> {
        let plaintext = plaintext.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to hash password: {}", e),
            })
    }

    async fn verify(&self, plaintext: &str, digest: &str) -> DomainResult<bool> {
        let plaintext = plaintext.to_string();
        let digest = digest.to_string();

        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &digest))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })?;

        match outcome {
            Ok(matches) => Ok(matches),
            Err(e) => {
                // A malformed stored digest cannot match anything
                tracing::warn!(
                    error = %e,
                    event = "password_digest_invalid",
                    "Stored password digest could not be parsed"
                );
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> BcryptPasswordHasher {
        // Lowest cost bcrypt accepts
        BcryptPasswordHasher::new(4)
    }

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = hasher();
        let digest = hasher.hash("correct horse").await.unwrap();

        assert_ne!(digest, "correct horse");
        assert!(hasher.verify("correct horse", &digest).await.unwrap());
        assert!(!hasher.verify("wrong horse", &digest).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let hasher = hasher();
        let first = hasher.hash("same-password").await.unwrap();
        let second = hasher.hash("same-password").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_malformed_digest_does_not_match() {
        assert!(!hasher().verify("anything", "not-a-bcrypt-digest").await.unwrap());
    }
}
