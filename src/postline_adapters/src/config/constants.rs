pub mod env {
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const PORT_ENV_VAR: &str = "PORT";
    pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";
    pub const EMAIL_ENV_VAR: &str = "EMAIL";
    pub const EMAIL_PASSWORD_ENV_VAR: &str = "EMAIL_PASSWORD";
    pub const SMTP_HOST_ENV_VAR: &str = "SMTP_HOST";
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
}

/// Optional settings file, resolved relative to the working directory.
pub const SETTINGS_FILE: &str = "config/settings";
pub const ENV_PREFIX: &str = "POSTLINE";

/// Ten days.
pub const DEFAULT_TOKEN_TTL_IN_SECONDS: i64 = 864_000;

pub mod prod {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 3001;
    pub const DEFAULT_SMTP_PORT: u16 = 587;
    pub const DEFAULT_SENDER: &str = "Postline <no-reply@postline.dev>";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub const JWT_SECRET: &str = "test-secret";
}
