//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use belva_db::models::user::User;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::body::AppJson;
use crate::response::ApiResponse;
use crate::services::admin::{self, TokenRequest, TokenResponse};
use crate::services::users::{self, MembershipStatusRequest, RegisterUserRequest};
use crate::state::AppState;

/// POST /api/v1/users/token
pub async fn issue_token(
    State(state): State<AppState>,
    AppJson(input): AppJson<TokenRequest>,
) -> AppResult<Json<ApiResponse<TokenResponse>>> {
    let token = admin::issue_user_token(&state.config, &input)?;
    Ok(ApiResponse::ok("Success get access token", token))
}

/// POST /api/v1/users
pub async fn register(
    _user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let user = users::register(&state.pool, input).await?;
    Ok(ApiResponse::created("Successfully registered user", user))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = users::get(&state.pool, &id).await?;
    Ok(ApiResponse::ok("Successfully found user.", user))
}

/// PUT /api/v1/users/{id}/membership
pub async fn update_membership(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<MembershipStatusRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = users::update_membership(&state.pool, &id, input).await?;
    Ok(ApiResponse::ok("Successfully updated membership status", user))
}
