//! Password recovery over HTTP: send-otp, verify-otp, reset-password

mod common;

#[cfg(test)]
mod otp_route_tests {
    use actix_web::http::{header, StatusCode};
    use serde_json::json;

    use sp_core::repositories::OtpStore;
    use sp_core::services::DeliveryChannel;

    use crate::common::{TestContext, EMAIL, PASSWORD, PHONE};
    use crate::{post_json, register_default_user, test_app};

    /// A 6-digit code guaranteed to differ from `code`
    fn wrong_code(code: &str) -> String {
        if code == "123456" { "654321" } else { "123456" }.to_string()
    }

    #[actix_web::test]
    async fn test_send_otp_for_registered_phone() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);
        register_default_user!(app);

        let (status, _, body) = post_json!(app, "/auth/send-otp", json!({ "phone": PHONE }));

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "OTP sent successfully to your mobile number");
        assert_eq!(body["provider"], "sms");
        assert_eq!(ctx.sms.sent_count(), 1);
        assert_eq!(ctx.sms.last_destination().as_deref(), Some("+919876543210"));
        assert!(body.get("otp").is_none());
    }

    #[actix_web::test]
    async fn test_send_otp_reports_console_provider() {
        let ctx = TestContext::with_channel(DeliveryChannel::Console);
        let app = test_app!(ctx);
        register_default_user!(app);

        let (status, _, body) = post_json!(app, "/auth/send-otp", json!({ "phone": PHONE }));

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["provider"], "console");
    }

    #[actix_web::test]
    async fn test_send_otp_requires_phone() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        let (status, _, body) = post_json!(app, "/auth/send-otp", json!({}));

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Phone number is required");
    }

    #[actix_web::test]
    async fn test_send_otp_rejects_malformed_phone() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        let (status, _, body) = post_json!(app, "/auth/send-otp", json!({ "phone": "5876543210" }));

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "PHONE_INVALID");
        assert_eq!(ctx.sms.sent_count(), 0);
    }

    #[actix_web::test]
    async fn test_send_otp_for_unknown_phone_is_not_found() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        let (status, _, body) = post_json!(app, "/auth/send-otp", json!({ "phone": PHONE }));

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "PHONE_NOT_REGISTERED");
        assert_eq!(body["message"], "Phone number not registered. Please register first.");
        assert!(ctx.store.is_empty().await);
    }

    #[actix_web::test]
    async fn test_second_send_within_cooldown_is_rate_limited() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);
        register_default_user!(app);

        post_json!(app, "/auth/send-otp", json!({ "phone": PHONE }));
        let (status, headers, body) = post_json!(app, "/auth/send-otp", json!({ "phone": PHONE }));

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "OTP_COOLDOWN_ACTIVE");
        assert_eq!(body["message"], "Please wait 1 minute before requesting another OTP");
        let retry_after: i64 = headers
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .expect("Retry-After header");
        assert!((1..=60).contains(&retry_after));
        assert_eq!(ctx.sms.sent_count(), 1);
    }

    #[actix_web::test]
    async fn test_delivery_failure_leaves_no_code_behind() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);
        register_default_user!(app);
        ctx.sms.set_failing(true);

        let (status, _, body) = post_json!(app, "/auth/send-otp", json!({ "phone": PHONE }));

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "SMS_DELIVERY_FAILED");
        assert!(ctx.store.get(PHONE).await.unwrap().is_none());

        // No cooldown after a failed delivery
        ctx.sms.set_failing(false);
        let (status, _, _) = post_json!(app, "/auth/send-otp", json!({ "phone": PHONE }));
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_verify_requires_phone_and_code() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        let (status, _, body) = post_json!(app, "/auth/verify-otp", json!({ "phone": PHONE }));

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Phone number and OTP are required");
    }

    #[actix_web::test]
    async fn test_verify_rejects_malformed_code() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        let (status, _, body) = post_json!(app, "/auth/verify-otp", json!({ "phone": PHONE, "otp": "12ab56" }));

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "OTP_FORMAT_INVALID");
        assert_eq!(body["message"], "OTP must be a 6-digit number");
    }

    #[actix_web::test]
    async fn test_verify_without_code_on_record() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        let (status, _, body) = post_json!(app, "/auth/verify-otp", json!({ "phone": PHONE, "otp": "123456" }));

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "OTP_NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_wrong_codes_count_down_then_lock_out() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);
        register_default_user!(app);
        post_json!(app, "/auth/send-otp", json!({ "phone": PHONE }));
        let code = ctx.sms.last_code();
        let wrong = wrong_code(&code);

        for expected_remaining in [2, 1, 0] {
            let (status, _, body) = post_json!(app, "/auth/verify-otp", json!({ "phone": PHONE, "otp": wrong }));
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "OTP_INVALID");
            assert_eq!(body["details"]["remaining_attempts"], expected_remaining);
        }

        // Exhausted: even the right code is refused and the record is gone
        let (status, _, body) = post_json!(app, "/auth/verify-otp", json!({ "phone": PHONE, "otp": code }));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "OTP_ATTEMPTS_EXCEEDED");

        let (_, _, body) = post_json!(app, "/auth/verify-otp", json!({ "phone": PHONE, "otp": code }));
        assert_eq!(body["error"], "OTP_NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_reset_without_verification_is_refused() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);
        register_default_user!(app);
        post_json!(app, "/auth/send-otp", json!({ "phone": PHONE }));

        let (status, _, body) = post_json!(
            app,
            "/auth/reset-password",
            json!({ "phone": PHONE, "newPassword": "brand-new-pass" })
        );

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "OTP_NOT_VERIFIED");
        assert_eq!(body["message"], "OTP verification required. Please verify OTP first.");
    }

    #[actix_web::test]
    async fn test_reset_requires_phone_and_password() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        let (status, _, body) = post_json!(app, "/auth/reset-password", json!({ "phone": PHONE }));

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Phone number and new password are required");
    }

    #[actix_web::test]
    async fn test_full_recovery_flow() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);
        register_default_user!(app);

        let (status, _, _) = post_json!(app, "/auth/send-otp", json!({ "phone": PHONE }));
        assert_eq!(status, StatusCode::OK);
        let code = ctx.sms.last_code();

        // Two misses, then the right code
        for _ in 0..2 {
            post_json!(app, "/auth/verify-otp", json!({ "phone": PHONE, "otp": wrong_code(&code) }));
        }
        let (status, _, body) = post_json!(app, "/auth/verify-otp", json!({ "phone": PHONE, "otp": code }));
        assert_eq!(status, StatusCode::OK, "{}", body);
        assert_eq!(body["message"], "OTP verified successfully");

        // Too short for recovery even though it would pass registration
        let (status, _, body) = post_json!(
            app,
            "/auth/reset-password",
            json!({ "phone": PHONE, "newPassword": "short1" })
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "PASSWORD_TOO_SHORT");

        let (status, _, body) = post_json!(
            app,
            "/auth/reset-password",
            json!({ "phone": PHONE, "newPassword": "brand-new-pass" })
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Password reset successfully");

        // One verification authorises one reset
        let (status, _, body) = post_json!(
            app,
            "/auth/reset-password",
            json!({ "phone": PHONE, "newPassword": "another-pass" })
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "OTP_NOT_VERIFIED");

        let (status, _, _) = post_json!(app, "/auth/login", json!({ "email": EMAIL, "password": PASSWORD }));
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _, _) = post_json!(
            app,
            "/auth/login",
            json!({ "email": EMAIL, "password": "brand-new-pass" })
        );
        assert_eq!(status, StatusCode::OK);
    }
}
