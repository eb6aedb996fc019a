//! In-memory implementation of UserRepository for development and tests

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainError};

use super::r#trait::UserRepository;

/// Process-local user repository
///
/// Contents are lost on restart.
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Checks if no user is stored
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_phone_or_email(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email == email || u.phone == phone)
            .cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.phone == phone).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn update_password_by_phone(
        &self,
        phone: &str,
        password_hash: &str,
    ) -> Result<u64, DomainError> {
        let mut users = self.users.write().await;
        let mut updated = 0;
        for user in users.values_mut().filter(|u| u.phone == phone) {
            user.password_hash = password_hash.to_string();
            updated += 1;
        }
        Ok(updated)
    }

    async fn insert_user(&self, user: NewUser) -> Result<i64, DomainError> {
        let mut users = self.users.write().await;

        // Duplicate check and insert share the write lock
        if users
            .values()
            .any(|u| u.email == user.email || u.phone == user.phone)
        {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        users.insert(id, user.into_user(id, Utc::now()));
        Ok(id)
    }
}
