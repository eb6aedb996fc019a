//! MySQL implementation of the UserRepository trait.
//!
//! Runtime-checked SQLx queries against the `users` table. Email and phone
//! carry unique indexes, so duplicate registrations that race past the
//! service-level lookup are still rejected by the insert itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::info;

use sp_core::domain::entities::user::{NewUser, User};
use sp_core::errors::{AuthError, DomainError};
use sp_core::repositories::UserRepository;

const USER_COLUMNS: &str = "id, email, password, name, phone, salary, created_at";

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        email VARCHAR(255) NOT NULL,
        password VARCHAR(255) NOT NULL,
        name VARCHAR(255) NOT NULL DEFAULT '',
        phone VARCHAR(20) NOT NULL,
        salary DOUBLE NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        UNIQUE KEY uk_users_email (email),
        UNIQUE KEY uk_users_phone (phone)
    )
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Create the `users` table if it does not exist
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(CREATE_USERS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to create users table", e))?;
        info!("users table ready");
        Ok(())
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        Ok(User {
            id: row.try_get("id").map_err(|e| internal("Failed to get id", e))?,
            email: row.try_get("email").map_err(|e| internal("Failed to get email", e))?,
            name: row
                .try_get::<Option<String>, _>("name")
                .map_err(|e| internal("Failed to get name", e))?
                .unwrap_or_default(),
            phone: row.try_get("phone").map_err(|e| internal("Failed to get phone", e))?,
            password_hash: row
                .try_get("password")
                .map_err(|e| internal("Failed to get password", e))?,
            salary: row.try_get("salary").map_err(|e| internal("Failed to get salary", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| internal("Failed to get created_at", e))?,
        })
    }

    async fn fetch_one_where(&self, clause: &str, binds: &[&str]) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} LIMIT 1", USER_COLUMNS, clause);
        let mut statement = sqlx::query(&query);
        for value in binds {
            statement = statement.bind(*value);
        }

        let row = statement
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to query users", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

fn internal(context: &str, error: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, error),
    }
}

fn is_duplicate_key(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_phone_or_email(&self, email: &str, phone: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("email = ? OR phone = ?", &[email, phone]).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("phone = ?", &[phone]).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("email = ?", &[email]).await
    }

    async fn update_password_by_phone(&self, phone: &str, password_hash: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("UPDATE users SET password = ? WHERE phone = ?")
            .bind(password_hash)
            .bind(phone)
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to update password", e))?;

        Ok(result.rows_affected())
    }

    async fn insert_user(&self, user: NewUser) -> Result<i64, DomainError> {
        let result = sqlx::query("INSERT INTO users (email, password, name, phone) VALUES (?, ?, ?, ?)")
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .bind(&user.phone)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    DomainError::Auth(AuthError::UserAlreadyExists)
                } else {
                    internal("Failed to create user", e)
                }
            })?;

        i64::try_from(result.last_insert_id()).map_err(|_| DomainError::Internal {
            message: "Inserted user id does not fit in i64".to_string(),
        })
    }
}
