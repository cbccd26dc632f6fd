use std::str::FromStr;

use axum::http::HeaderValue;

use crate::auth::jwt::JwtConfig;

/// Error raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Argon2 PHC hashes the admin login is checked against.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username_hash: String,
    pub password_hash: String,
}

/// Server configuration loaded from environment variables.
///
/// Optional values have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub database_url: String,
    pub jwt: JwtConfig,
    pub admin: AdminCredentials,
    /// Recipient of contact-form messages and new-order notices.
    pub admin_email: String,
    /// Maximum concurrent notification sends (default: `4`).
    pub notification_concurrency: usize,
    /// Per-send notification timeout in seconds (default: `10`).
    pub notification_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `HOST`                      | `0.0.0.0`               |
    /// | `PORT`                      | `3000`                  |
    /// | `CORS_ORIGINS`              | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                    |
    /// | `DATABASE_URL`              | `DIRECT_URL`, required  |
    /// | `ADMIN_USERNAME_HASH`       | required                |
    /// | `ADMIN_PASSWORD_HASH`       | required                |
    /// | `ADMIN_EMAIL`               | required                |
    /// | `NOTIFICATION_CONCURRENCY`  | `4`                     |
    /// | `NOTIFICATION_TIMEOUT_SECS` | `10`                    |
    ///
    /// JWT keys are documented on [`JwtConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_or("PORT", 3000u16)?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                key: "CORS_ORIGINS",
                reason: format!("'{origin}': {e}"),
            })?;
        }

        let request_timeout_secs = parse_or("REQUEST_TIMEOUT_SECS", 30u64)?;

        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("DIRECT_URL"))
            .map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let admin = AdminCredentials {
            username_hash: required("ADMIN_USERNAME_HASH")?,
            password_hash: required("ADMIN_PASSWORD_HASH")?,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            jwt: JwtConfig::from_env()?,
            admin,
            admin_email: required("ADMIN_EMAIL")?,
            notification_concurrency: parse_or("NOTIFICATION_CONCURRENCY", 4usize)?,
            notification_timeout_secs: parse_or("NOTIFICATION_TIMEOUT_SECS", 10u64)?,
        })
    }
}

/// Read a required, non-empty variable.
pub(crate) fn required(key: &'static str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(key)),
    }
}

/// Parse an optional variable, falling back to `default` when unset.
pub(crate) fn parse_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
