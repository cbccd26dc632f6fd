//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use belva_core::error::CoreError;
use belva_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise, including
/// when the token carries no role at all.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role.as_deref() {
            Some(ROLE_ADMIN) => Ok(RequireAdmin(user)),
            Some(_) => Err(AppError::Core(CoreError::Forbidden(
                "Access denied: insufficient permissions".into(),
            ))),
            None => Err(AppError::Core(CoreError::Forbidden(
                "Access denied: invalid token".into(),
            ))),
        }
    }
}
