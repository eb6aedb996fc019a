//! Spendly HTTP API
//!
//! Library half of the server binary, exported so integration tests can
//! build the same application.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::create_app;
pub use config::{Config, ConfigError};
pub use routes::AppState;
