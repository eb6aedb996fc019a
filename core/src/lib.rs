//! # Spendly Core
//!
//! Domain layer for the Spendly authentication backend: entities, the OTP
//! password-recovery lifecycle, registration and login, and the repository
//! and collaborator traits the infrastructure layer implements.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
