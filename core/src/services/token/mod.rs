//! Token service module for JWT issuance
//!
//! Session tokens are HS256-signed JWTs carrying the user id and email.

mod config;
mod service;

pub use config::TokenServiceConfig;
pub use service::{Claims, JwtTokenIssuer, TokenIssuer};
