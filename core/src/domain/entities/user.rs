//! User entity representing a registered Spendly account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity as stored in the user repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Database-assigned identifier
    pub id: i64,

    pub email: String,

    /// Display name; empty when not provided at registration
    pub name: String,

    /// 10-digit national mobile number
    pub phone: String,

    /// bcrypt digest of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Monthly salary entered in the app, if any
    pub salary: Option<f64>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a user; the id is assigned by the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub password_hash: String,
}

impl NewUser {
    /// Materialise the stored entity once an id has been assigned
    pub fn into_user(self, id: i64, created_at: DateTime<Utc>) -> User {
        User {
            id,
            email: self.email,
            name: self.name,
            phone: self.phone,
            password_hash: self.password_hash,
            salary: None,
            created_at,
        }
    }
}
