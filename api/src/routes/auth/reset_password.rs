use actix_web::{web, HttpResponse};

use sp_core::errors::ValidationError;

use crate::dto::auth::{ResetPasswordRequest, SuccessResponse};
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /auth/reset-password
///
/// Consumes a verified code. The password is taken as sent; only the phone
/// is trimmed.
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> HttpResponse {
    let phone = request.phone.trim();
    if phone.is_empty() || request.new_password.is_empty() {
        return handle_domain_error(&ValidationError::missing(&["Phone number", "new password"]).into());
    }

    match state.otp_service.reset_password(phone, &request.new_password).await {
        Ok(()) => HttpResponse::Ok().json(SuccessResponse::new("Password reset successfully")),
        Err(error) => handle_domain_error(&error),
    }
}
