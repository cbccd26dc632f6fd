//! JWT bearer-token extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use belva_core::error::CoreError;

use crate::auth::jwt::verify_bearer;
use crate::error::AppError;
use crate::state::AppState;

/// Caller identity extracted from the `Authorization: Bearer` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(subject = %user.subject, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Admin username or user session id (from `claims.sub`).
    pub subject: String,
    /// Present only on admin tokens.
    pub role: Option<String>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::BadRequest("Missing or malformed JWT".into()))?;

        let claims = verify_bearer(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            AppError::Core(CoreError::Unauthorized("Invalid or expired JWT".into()))
        })?;

        Ok(AuthUser {
            subject: claims.sub,
            role: claims.role,
        })
    }
}
