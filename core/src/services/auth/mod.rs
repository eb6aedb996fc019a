//! Account registration and email/password login

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthOutcome, AuthService, Registration};
