use actix_web::{web, HttpResponse};

use sp_core::services::Registration;

use crate::dto::auth::{RegisterRequest, RegisterResponse, UserSummary};
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /auth/register
///
/// Creates an account and returns a session token.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "asha@example.com",
///     "password": "secret1",
///     "name": "Asha",
///     "phone": "9876543210"
/// }
/// ```
///
/// # Response
///
/// 201 with `{message, token, user: {id, email, name, phone}}`; 400 for
/// missing or malformed fields, 409 when the email or phone is taken.
pub async fn register(state: web::Data<AppState>, request: web::Json<RegisterRequest>) -> HttpResponse {
    let request = request.into_inner();
    let registration = Registration {
        email: request.email,
        password: request.password,
        name: request.name,
        phone: request.phone,
    };

    match state.auth_service.register(registration).await {
        Ok(outcome) => HttpResponse::Created().json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserSummary::from(&outcome.user),
            token: outcome.token,
        }),
        Err(error) => handle_domain_error(&error),
    }
}
