//! Handlers for the `/admin` resource.

use axum::extract::{Query, State};
use axum::Json;
use belva_db::models::user::User;

use crate::error::AppResult;
use crate::middleware::body::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::ApiResponse;
use crate::services::admin::{self, LoginRequest, TokenResponse};
use crate::services::users;
use crate::state::AppState;

/// POST /api/v1/admin/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<TokenResponse>>> {
    let token = admin::login(&state.config, &input).await?;
    Ok(ApiResponse::ok("Success get access token", token))
}

/// GET /api/v1/admin/get_users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    let users = users::list(&state.pool, params.page()).await?;
    Ok(ApiResponse::ok("Successfully retrieved users.", users))
}
