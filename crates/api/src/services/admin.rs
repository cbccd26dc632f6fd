//! Admin login and user token issuance.

use belva_core::error::CoreError;
use belva_core::validation::validate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_admin_token, generate_user_token};
use crate::auth::password::verify_password;
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    #[serde(default, rename = "sessionId")]
    #[validate(length(min = 1))]
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Check both values against the configured hashes and issue an admin token.
pub async fn login(config: &ServerConfig, input: &LoginRequest) -> AppResult<TokenResponse> {
    validate(input)?;

    let username = input.username.clone();
    let password = input.password.clone();
    let creds = config.admin.clone();

    // Argon2 is CPU-bound; both hashes are always checked.
    let accepted = tokio::task::spawn_blocking(move || {
        let username_ok = verify_password(&username, &creds.username_hash)?;
        let password_ok = verify_password(&password, &creds.password_hash)?;
        Ok::<_, argon2::password_hash::Error>(username_ok && password_ok)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Credential check panicked: {e}")))?
    .map_err(|e| AppError::InternalError(format!("Admin credential hash unusable: {e}")))?;

    if !accepted {
        tracing::warn!("Admin login rejected");
        return Err(CoreError::Unauthorized("Incorrect username or password".into()).into());
    }

    let access_token = generate_admin_token(&input.username, &config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token signing failed: {e}")))?;
    tracing::info!("Admin token issued");

    Ok(TokenResponse {
        access_token,
        expires_in: config.jwt.expiry_hours * 3600,
    })
}

/// Issue a user token for a client-supplied session id. No credential check.
pub fn issue_user_token(config: &ServerConfig, input: &TokenRequest) -> AppResult<TokenResponse> {
    let input = TokenRequest {
        session_id: input.session_id.trim().to_string(),
    };
    validate(&input)?;

    let access_token = generate_user_token(&input.session_id, &config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token signing failed: {e}")))?;

    Ok(TokenResponse {
        access_token,
        expires_in: config.jwt.expiry_hours * 3600,
    })
}
