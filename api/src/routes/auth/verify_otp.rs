use actix_web::{web, HttpResponse};

use sp_core::errors::ValidationError;

use crate::dto::auth::{SuccessResponse, VerifyOtpRequest};
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /auth/verify-otp
///
/// A wrong code answers 400 `OTP_INVALID` with `details.remaining_attempts`.
/// Expired, exhausted or unknown codes also answer 400 and require a new
/// code to be requested.
pub async fn verify_otp(state: web::Data<AppState>, request: web::Json<VerifyOtpRequest>) -> HttpResponse {
    let phone = request.phone.trim();
    let otp = request.otp.trim();
    if phone.is_empty() || otp.is_empty() {
        return handle_domain_error(&ValidationError::missing(&["Phone number", "OTP"]).into());
    }

    match state.otp_service.verify_otp(phone, otp).await {
        Ok(()) => HttpResponse::Ok().json(SuccessResponse::new("OTP verified successfully")),
        Err(error) => handle_domain_error(&error),
    }
}
