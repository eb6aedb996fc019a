//! Database module - MySQL implementations using SQLx
//!
//! This module provides the connection pool and the MySQL user repository.

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::MySqlUserRepository;
