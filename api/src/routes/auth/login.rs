use actix_web::{web, HttpResponse};

use crate::dto::auth::{LoginRequest, LoginResponse, UserProfile};
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /auth/login
///
/// Unknown email and wrong password are indistinguishable to the caller
/// (401 `INVALID_CREDENTIALS`).
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    match state.auth_service.login(&request.email, &request.password).await {
        Ok(outcome) => HttpResponse::Ok().json(LoginResponse {
            message: "Login successful".to_string(),
            user: UserProfile::from(&outcome.user),
            token: outcome.token,
        }),
        Err(error) => handle_domain_error(&error),
    }
}
