use std::env;

use config::{Config, ConfigError, Environment, File, builder::DefaultState};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::constants::{
    DEFAULT_TOKEN_TTL_IN_SECONDS, ENV_PREFIX, SETTINGS_FILE,
    env::{
        APP_ENVIRONMENT_ENV_VAR, DATABASE_URL_ENV_VAR, EMAIL_ENV_VAR, EMAIL_PASSWORD_ENV_VAR,
        JWT_SECRET_ENV_VAR, PORT_ENV_VAR, SMTP_HOST_ENV_VAR,
    },
    prod::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SENDER, DEFAULT_SMTP_PORT},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, AppEnvironment::Production)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSetting {
    pub host: String,
    pub port: u16,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl ApplicationSetting {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSetting {
    /// Empty selects the in-memory stores.
    pub url: Secret<String>,
    pub max_connections: u32,
}

impl DatabaseSetting {
    pub fn is_in_memory(&self) -> bool {
        self.url.expose_secret().trim().is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSetting {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSetting {
    /// Empty turns the SMTP client into a log-only no-op.
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: Secret<String>,
    pub sender: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostlineSetting {
    pub environment: AppEnvironment,
    pub application: ApplicationSetting,
    pub database: DatabaseSetting,
    pub auth: AuthSetting,
    pub email_client: EmailClientSetting,
}

impl PostlineSetting {
    /// Loads the settings from the built-in defaults, the optional settings
    /// file, `POSTLINE_*` variables and finally the plain process variables
    /// (`DATABASE_URL`, `PORT`, `JWT_SECRET`, ...). Later sources win.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings: Self = Self::defaults()?
            .add_source(File::with_name(SETTINGS_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("application.allowed_origins"),
            )
            .set_override_option("database.url", env::var(DATABASE_URL_ENV_VAR).ok())?
            .set_override_option("application.port", env::var(PORT_ENV_VAR).ok())?
            .set_override_option("auth.jwt_secret", env::var(JWT_SECRET_ENV_VAR).ok())?
            .set_override_option("email_client.username", env::var(EMAIL_ENV_VAR).ok())?
            .set_override_option(
                "email_client.password",
                env::var(EMAIL_PASSWORD_ENV_VAR).ok(),
            )?
            .set_override_option("email_client.smtp_host", env::var(SMTP_HOST_ENV_VAR).ok())?
            .set_override_option("environment", env::var(APP_ENVIRONMENT_ENV_VAR).ok())?
            .build()?
            .try_deserialize()?;

        settings.validate()
    }

    pub fn defaults() -> Result<config::ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", "development")?
            .set_default("application.host", DEFAULT_HOST)?
            .set_default("application.port", DEFAULT_PORT)?
            .set_default("application.allowed_origins", Vec::<String>::new())?
            .set_default("database.url", "")?
            .set_default("database.max_connections", 5)?
            .set_default("auth.jwt_secret", "")?
            .set_default("auth.token_ttl_in_seconds", DEFAULT_TOKEN_TTL_IN_SECONDS)?
            .set_default("email_client.smtp_host", "")?
            .set_default("email_client.smtp_port", DEFAULT_SMTP_PORT)?
            .set_default("email_client.username", "")?
            .set_default("email_client.password", "")?
            .set_default("email_client.sender", DEFAULT_SENDER)
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.auth.jwt_secret.expose_secret().is_empty() {
            return Err(ConfigError::Message(format!(
                "{JWT_SECRET_ENV_VAR} must be set"
            )));
        }
        if self.auth.token_ttl_in_seconds <= 0 {
            return Err(ConfigError::Message(
                "auth.token_ttl_in_seconds must be positive".to_owned(),
            ));
        }
        if self.environment.is_production() && self.database.is_in_memory() {
            return Err(ConfigError::Message(format!(
                "{DATABASE_URL_ENV_VAR} must be set in production"
            )));
        }
        Ok(self)
    }
}
