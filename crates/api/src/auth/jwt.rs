//! HS256 bearer tokens.
//!
//! Two kinds are issued: admin tokens (`role = "admin"`, signed with the
//! admin secret) and user tokens (no role, signed with the user secret).
//! [`verify_bearer`] accepts either.

use belva_core::roles::ROLE_ADMIN;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{parse_or, required, ConfigError};

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Admin username or the client-supplied session id.
    pub sub: String,
    /// A role claim that is not a string decodes as `None`.
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(role)) => Ok(Some(role)),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret for user tokens.
    pub user_secret: String,
    /// Secret for admin tokens. Equal to `user_secret` unless configured.
    pub admin_secret: String,
    /// Token lifetime in hours (default: 72).
    pub expiry_hours: i64,
}

/// Default token lifetime in hours.
const DEFAULT_EXPIRY_HOURS: i64 = 72;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var            | Required | Default      |
    /// |--------------------|----------|--------------|
    /// | `JWT_SECRET`       | **yes**  |              |
    /// | `ADMIN_JWT_SECRET` | no       | `JWT_SECRET` |
    /// | `JWT_EXPIRY_HOURS` | no       | `72`         |
    pub fn from_env() -> Result<Self, ConfigError> {
        let user_secret = required("JWT_SECRET")?;
        let admin_secret = required("ADMIN_JWT_SECRET").unwrap_or_else(|_| user_secret.clone());
        Ok(Self {
            user_secret,
            admin_secret,
            expiry_hours: parse_or("JWT_EXPIRY_HOURS", DEFAULT_EXPIRY_HOURS)?,
        })
    }
}

fn sign(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(), // HS256
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

fn claims_for(subject: &str, role: Option<&str>, config: &JwtConfig) -> Claims {
    let now = chrono::Utc::now().timestamp();
    Claims {
        sub: subject.to_string(),
        role: role.map(str::to_string),
        exp: now + config.expiry_hours * 3600,
        iat: now,
    }
}

/// Issue an admin token for `username`.
pub fn generate_admin_token(
    username: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    sign(
        &claims_for(username, Some(ROLE_ADMIN), config),
        &config.admin_secret,
    )
}

/// Issue a role-less user token keyed by the client's session id.
pub fn generate_user_token(
    session_id: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    sign(&claims_for(session_id, None, config), &config.user_secret)
}

/// Validate signature and expiry against one secret.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Verify a bearer token with the admin secret, then the user secret.
///
/// A token that only verifies under the user secret has its role cleared.
pub fn verify_bearer(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    match validate_token(token, &config.admin_secret) {
        Ok(claims) => Ok(claims),
        Err(admin_err) if config.admin_secret == config.user_secret => Err(admin_err),
        Err(_) => validate_token(token, &config.user_secret).map(|claims| Claims {
            role: None,
            ..claims
        }),
    }
}
