//! Authentication route handlers
//!
//! - Account registration and login
//! - Phone-based password recovery (send, verify, reset)

pub mod login;
pub mod register;
pub mod reset_password;
pub mod send_otp;
pub mod verify_otp;

use actix_web::web;
use std::sync::Arc;

use sp_core::repositories::{OtpStore, UserRepository};
use sp_core::services::{AuthService, OtpService, PasswordHasher, SmsSender, TokenIssuer};

/// OTP service over trait objects, as wired by the binary and the tests
pub type DynOtpService = OtpService<dyn UserRepository, dyn OtpStore, dyn SmsSender, dyn PasswordHasher>;

/// Auth service over trait objects
pub type DynAuthService = AuthService<dyn UserRepository, dyn PasswordHasher, dyn TokenIssuer>;

/// Application state that holds shared services
pub struct AppState {
    pub auth_service: Arc<DynAuthService>,
    pub otp_service: Arc<DynOtpService>,
}

impl AppState {
    pub fn new(auth_service: Arc<DynAuthService>, otp_service: Arc<DynOtpService>) -> Self {
        Self {
            auth_service,
            otp_service,
        }
    }
}

/// Register the `/auth` scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register::register))
            .route("/login", web::post().to(login::login))
            .route("/send-otp", web::post().to(send_otp::send_otp))
            .route("/verify-otp", web::post().to(verify_otp::verify_otp))
            .route("/reset-password", web::post().to(reset_password::reset_password)),
    );
}
