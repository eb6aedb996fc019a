//! Process configuration assembled from the environment

use sp_shared::{
    AuthConfig, CacheConfig, CorsConfig, DatabaseConfig, Environment, LoggingConfig, OtpConfig,
    ServerConfig, SmsConfig,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid SMS configuration: {0}")]
    Sms(String),

    #[error("JWT_SECRET must be set to a non-default value in production")]
    DefaultJwtSecret,

    #[error("DATABASE_URL is required in production")]
    MissingDatabase,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub auth: AuthConfig,
    pub otp: OtpConfig,
    pub sms: SmsConfig,
    /// MySQL user store; `None` selects the in-memory repository
    pub database: Option<DatabaseConfig>,
    /// Redis OTP store; `None` selects the in-memory store
    pub cache: Option<CacheConfig>,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();

        let config = Config {
            environment,
            server: ServerConfig::from_env(),
            cors: CorsConfig::from_env(),
            auth: AuthConfig::from_env(),
            otp: OtpConfig::from_env(),
            sms: SmsConfig::from_env().map_err(ConfigError::Sms)?,
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        };

        config.validate()?;
        Ok(config)
    }

    /// Production refuses the development JWT secret and the in-memory user store
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_production() {
            return Ok(());
        }
        if self.auth.jwt.is_using_default_secret() {
            return Err(ConfigError::DefaultJwtSecret);
        }
        if self.database.is_none() {
            return Err(ConfigError::MissingDatabase);
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}
