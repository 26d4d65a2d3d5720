use std::env;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Token signing parameters.
#[derive(Clone, Debug)]
pub struct JwtSettings {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub subject: String,
    pub expire_minutes: i64,
}

/// Credentials used to create the first HR admin on an empty database.
#[derive(Clone, Debug)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub jwt: JwtSettings,
    pub ui_origin: String,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,
    pub bootstrap_admin: Option<BootstrapAdmin>,

    pub log_dir: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let bootstrap_admin = match (
            env::var("BOOTSTRAP_ADMIN_EMAIL").ok(),
            env::var("BOOTSTRAP_ADMIN_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some(BootstrapAdmin { email, password })
            }
            _ => None,
        };

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080"),
            database_url: required("DATABASE_URL")?,
            jwt: JwtSettings {
                secret: required("JWT_SECRET")?,
                issuer: var_or("JWT_ISSUER", "hr-information-system"),
                audience: var_or("JWT_AUDIENCE", "hr-information-system"),
                subject: var_or("JWT_SUBJECT", "hr-information-system"),
                expire_minutes: parsed("JWT_EXPIRE_MINUTES", 60)?,
            },
            ui_origin: var_or("UI_ORIGIN", "http://localhost:3000"),
            rate_login_per_min: parsed("RATE_LOGIN_PER_MIN", 60)?,
            rate_protected_per_min: parsed("RATE_PROTECTED_PER_MIN", 1000)?,
            api_prefix: var_or("API_PREFIX", "/api"),
            bootstrap_admin,
            log_dir: var_or("LOG_DIR", "logs"),
            log_level: var_or("LOG_LEVEL", "debug"),
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}
