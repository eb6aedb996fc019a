//! Start-up wiring: concrete stores, SMS provider and services

use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};

use sp_core::repositories::{InMemoryOtpStore, InMemoryUserRepository, OtpStore, UserRepository};
use sp_core::services::{
    AuthService, AuthServiceConfig, BcryptPasswordHasher, JwtTokenIssuer, OtpService, OtpServiceConfig,
    PasswordHasher, SmsSender, TokenIssuer, TokenServiceConfig,
};
use sp_infra::cache::RedisOtpStore;
use sp_infra::database::{DatabasePool, MySqlUserRepository};
use sp_infra::sms::{create_sms_service, SmsService, SmsServiceAdapter};

use crate::config::Config;
use crate::routes::AppState;

/// Connect every backend named by `config` and assemble the services
pub async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let users = build_user_repository(config).await?;

    let otp_config = OtpServiceConfig::from_settings(&config.otp, &config.auth.jwt.secret);
    let store = build_otp_store(config, &otp_config).await?;

    let provider = create_sms_service(&config.sms, config.environment)
        .await
        .context("failed to initialise SMS provider")?;
    info!(
        provider = provider.provider_name(),
        channel = %provider.channel(),
        "SMS provider selected"
    );
    if !provider.is_available().await {
        warn!(
            provider = provider.provider_name(),
            "SMS provider will refuse every message; send-otp requests will fail"
        );
    }
    let sms: Arc<dyn SmsSender> = Arc::new(SmsServiceAdapter::from_boxed(provider));

    let password_hasher: Arc<dyn PasswordHasher> =
        Arc::new(BcryptPasswordHasher::new(config.auth.password.bcrypt_cost));
    let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new(TokenServiceConfig::from(&config.auth.jwt)));

    let otp_service = OtpService::new(users.clone(), store, sms, password_hasher.clone(), otp_config);
    let auth_service = AuthService::new(users, password_hasher, tokens, AuthServiceConfig::default());

    Ok(AppState::new(Arc::new(auth_service), Arc::new(otp_service)))
}

async fn build_user_repository(config: &Config) -> anyhow::Result<Arc<dyn UserRepository>> {
    let Some(database) = &config.database else {
        warn!("DATABASE_URL not set; accounts are kept in memory and lost on restart");
        return Ok(Arc::new(InMemoryUserRepository::new()));
    };

    let pool = DatabasePool::connect(database)
        .await
        .context("failed to connect to MySQL")?;
    let repository = MySqlUserRepository::new(pool.pool().clone());
    repository
        .ensure_schema()
        .await
        .context("failed to prepare users table")?;

    info!(store = "mysql", "user repository ready");
    Ok(Arc::new(repository))
}

async fn build_otp_store(config: &Config, otp_config: &OtpServiceConfig) -> anyhow::Result<Arc<dyn OtpStore>> {
    let Some(cache) = &config.cache else {
        info!(store = "memory", "OTP store ready");
        return Ok(Arc::new(InMemoryOtpStore::new()));
    };

    let retention = otp_config
        .retention()
        .to_std()
        .context("OTP lifetime must be positive")?;
    let store = RedisOtpStore::connect(cache, retention)
        .await
        .context("failed to connect to Redis")?;

    info!(store = "redis", "OTP store ready");
    Ok(Arc::new(store))
}
