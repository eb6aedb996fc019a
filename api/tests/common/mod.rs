//! Shared fixtures for the HTTP tests: in-memory stores, a recording SMS
//! sender and cheap bcrypt

#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::web;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use sp_api::middleware::cors::create_cors;
use sp_api::AppState;
use sp_core::repositories::{InMemoryOtpStore, InMemoryUserRepository, OtpStore, UserRepository};
use sp_core::services::{
    AuthService, AuthServiceConfig, BcryptPasswordHasher, DeliveryChannel, DeliveryError, DeliveryReceipt,
    JwtTokenIssuer, OtpService, OtpServiceConfig, PasswordHasher, SmsSender, TokenIssuer, TokenServiceConfig,
};
use sp_shared::{CorsConfig, Environment};

pub const PHONE: &str = "9876543210";
pub const EMAIL: &str = "asha@example.com";
pub const PASSWORD: &str = "secret1";
pub const JWT_SECRET: &str = "test-jwt-secret";
pub const MAX_PAYLOAD: usize = 4096;

/// Records outbound messages instead of sending them
pub struct RecordingSms {
    outbox: Mutex<Vec<(String, String)>>,
    channel: DeliveryChannel,
    failing: AtomicBool,
}

impl RecordingSms {
    pub fn new(channel: DeliveryChannel) -> Self {
        Self {
            outbox: Mutex::new(Vec::new()),
            channel,
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.outbox.lock().unwrap().len()
    }

    pub fn last_destination(&self) -> Option<String> {
        self.outbox.lock().unwrap().last().map(|(to, _)| to.clone())
    }

    /// The 6-digit code from the most recent message
    pub fn last_code(&self) -> String {
        let outbox = self.outbox.lock().unwrap();
        let (_, message) = outbox.last().expect("an SMS should have been sent");
        message
            .split(|c: char| !c.is_ascii_digit())
            .find(|part| part.len() == 6)
            .expect("message should contain a 6-digit code")
            .to_string()
    }
}

#[async_trait]
impl SmsSender for RecordingSms {
    async fn send(&self, destination: &str, message: &str) -> Result<DeliveryReceipt, DeliveryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DeliveryError::new("recording", "gateway unavailable"));
        }
        self.outbox
            .lock()
            .unwrap()
            .push((destination.to_string(), message.to_string()));
        Ok(DeliveryReceipt {
            provider: "recording".to_string(),
            channel: self.channel,
            message_id: None,
        })
    }

    fn provider_name(&self) -> &str {
        "recording"
    }
}

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub sms: Arc<RecordingSms>,
    pub users: Arc<InMemoryUserRepository>,
    pub store: Arc<InMemoryOtpStore>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_channel(DeliveryChannel::Sms)
    }

    pub fn with_channel(channel: DeliveryChannel) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let store = Arc::new(InMemoryOtpStore::new());
        let sms = Arc::new(RecordingSms::new(channel));

        let user_repo: Arc<dyn UserRepository> = users.clone();
        let otp_store: Arc<dyn OtpStore> = store.clone();
        let sender: Arc<dyn SmsSender> = sms.clone();
        let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptPasswordHasher::new(4));
        let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new(TokenServiceConfig {
            jwt_secret: JWT_SECRET.to_string(),
            expiry_seconds: 3600,
        }));

        let otp_service = OtpService::new(
            user_repo.clone(),
            otp_store,
            sender,
            hasher.clone(),
            OtpServiceConfig::default(),
        );
        let auth_service = AuthService::new(user_repo, hasher, tokens, AuthServiceConfig::default());

        Self {
            state: web::Data::new(AppState::new(Arc::new(auth_service), Arc::new(otp_service))),
            sms,
            users,
            store,
        }
    }
}

pub fn cors() -> Cors {
    create_cors(&CorsConfig::default(), Environment::Development)
}

/// Build the application under test from a [`TestContext`]
#[macro_export]
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(sp_api::create_app(
            $ctx.state.clone(),
            $crate::common::cors(),
            $crate::common::MAX_PAYLOAD,
        ))
        .await
    };
}

/// POST a JSON body; yields `(status, headers, json body)`
#[macro_export]
macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri($uri)
            .set_json(&$body)
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, headers, body)
    }};
}

/// Register the default account through the API
#[macro_export]
macro_rules! register_default_user {
    ($app:expr) => {{
        let (status, _, body) = $crate::post_json!(
            $app,
            "/auth/register",
            serde_json::json!({
                "email": $crate::common::EMAIL,
                "password": $crate::common::PASSWORD,
                "name": "Asha",
                "phone": $crate::common::PHONE,
            })
        );
        assert_eq!(status, actix_web::http::StatusCode::CREATED, "{}", body);
        body
    }};
}
