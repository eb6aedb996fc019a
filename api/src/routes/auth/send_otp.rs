use actix_web::{web, HttpResponse};

use sp_core::errors::ValidationError;

use crate::dto::auth::{SendOtpRequest, SendOtpResponse};
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /auth/send-otp
///
/// Issues a recovery code for a registered phone number and sends it by SMS.
///
/// # Request Body
///
/// ```json
/// { "phone": "9876543210" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "OTP sent successfully to your mobile number",
///     "provider": "sms"
/// }
/// ```
///
/// ## Errors
/// - 400 `PHONE_INVALID`
/// - 404 `PHONE_NOT_REGISTERED`
/// - 429 `OTP_COOLDOWN_ACTIVE` with a `Retry-After` header
/// - 500 `SMS_DELIVERY_FAILED`
pub async fn send_otp(state: web::Data<AppState>, request: web::Json<SendOtpRequest>) -> HttpResponse {
    let phone = request.phone.trim();
    if phone.is_empty() {
        return handle_domain_error(&ValidationError::missing(&["Phone number"]).into());
    }

    match state.otp_service.request_otp(phone).await {
        Ok(dispatch) => HttpResponse::Ok().json(SendOtpResponse {
            success: true,
            message: "OTP sent successfully to your mobile number".to_string(),
            provider: dispatch.channel.as_str().to_string(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}
