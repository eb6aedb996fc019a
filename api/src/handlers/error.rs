//! Mapping from domain errors to HTTP responses

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::{header, StatusCode},
    HttpRequest, HttpResponse,
};
use tracing::{error, warn};

use sp_core::errors::{DomainError, ErrorKind, OtpError};
use sp_shared::{error_codes, ErrorResponse};

/// HTTP status for a domain error
///
/// Everything about a code the client can act on answers 400; only a
/// missing account is a 404.
pub fn status_for(error: &DomainError) -> StatusCode {
    match error.kind() {
        ErrorKind::Validation
        | ErrorKind::Expired
        | ErrorKind::AttemptsExceeded
        | ErrorKind::InvalidCode
        | ErrorKind::Unauthorized => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound if error.code() == error_codes::OTP_NOT_FOUND => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::RateLimit => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Credential => StatusCode::UNAUTHORIZED,
        ErrorKind::Delivery | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Render a domain error as the standard error envelope
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    if status.is_server_error() {
        error!(error = %error, code = error.code(), "request failed");
    } else {
        warn!(code = error.code(), "request rejected: {}", error);
    }

    let mut body = ErrorResponse::new(error.code(), error.public_message());
    let mut retry_after = None;

    match error {
        DomainError::Otp(OtpError::InvalidCode { remaining }) => {
            body = body.add_detail("remaining_attempts", remaining);
        }
        DomainError::Otp(OtpError::CooldownActive {
            retry_after_seconds, ..
        }) => {
            body = body.add_detail("retry_after_seconds", retry_after_seconds);
            retry_after = Some(*retry_after_seconds);
        }
        _ => {}
    }

    let mut response = HttpResponse::build(status);
    if let Some(seconds) = retry_after {
        response.insert_header((header::RETRY_AFTER, seconds.max(1).to_string()));
    }
    response.json(body)
}

/// `JsonConfig` error handler: malformed bodies get the standard envelope
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "Request body is too large".to_string()
        }
        _ => "Request body is not valid JSON".to_string(),
    };
    warn!(error = %err, "rejected request body");

    let response = HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use sp_core::errors::{AuthError, ValidationError};

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(DomainError, StatusCode)> = vec![
            (ValidationError::InvalidOtpFormat.into(), StatusCode::BAD_REQUEST),
            (AuthError::InvalidPhoneFormat.into(), StatusCode::BAD_REQUEST),
            (AuthError::PhoneNotRegistered.into(), StatusCode::NOT_FOUND),
            (AuthError::UserNotFound.into(), StatusCode::NOT_FOUND),
            (OtpError::NotFound.into(), StatusCode::BAD_REQUEST),
            (OtpError::Expired.into(), StatusCode::BAD_REQUEST),
            (OtpError::AttemptsExceeded.into(), StatusCode::BAD_REQUEST),
            (OtpError::NotVerified.into(), StatusCode::BAD_REQUEST),
            (OtpError::VerificationExpired.into(), StatusCode::BAD_REQUEST),
            (OtpError::DeliveryFailed.into(), StatusCode::INTERNAL_SERVER_ERROR),
            (AuthError::UserAlreadyExists.into(), StatusCode::CONFLICT),
            (AuthError::InvalidCredentials.into(), StatusCode::UNAUTHORIZED),
        ];

        for (error, expected) in cases {
            assert_eq!(status_for(&error), expected, "unexpected status for {:?}", error);
        }
    }

    #[actix_web::test]
    async fn test_cooldown_sets_retry_after() {
        let error: DomainError = OtpError::CooldownActive {
            cooldown_seconds: 60,
            retry_after_seconds: 42,
        }
        .into();

        let response = handle_domain_error(&error);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "42");

        let body = body_json(response).await;
        assert_eq!(body["error"], "OTP_COOLDOWN_ACTIVE");
        assert_eq!(body["details"]["retry_after_seconds"], 42);
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_invalid_code_reports_remaining_attempts() {
        let response = handle_domain_error(&OtpError::InvalidCode { remaining: 2 }.into());
        let body = body_json(response).await;

        assert_eq!(body["message"], "Invalid OTP. 2 attempts remaining.");
        assert_eq!(body["details"]["remaining_attempts"], 2);
    }

    #[actix_web::test]
    async fn test_internal_error_is_masked() {
        let error = DomainError::Internal {
            message: "Access denied for user 'root'@'db'".to_string(),
        };

        let response = handle_domain_error(&error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
        assert!(body.get("details").is_none());
    }
}
