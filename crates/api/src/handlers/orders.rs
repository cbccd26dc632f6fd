//! Handlers for the `/orders` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use belva_db::models::order::Order;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::body::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{OrderListParams, PaginationParams};
use crate::response::ApiResponse;
use crate::services::orders::{self, CreateOrderRequest, OrderListResponse, UpdateStatusRequest};
use crate::state::AppState;

/// POST /api/v1/orders
///
/// Waits for both notification emails before responding; their outcome does
/// not affect the response.
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Order>>)> {
    let order = orders::create(
        &state.pool,
        &state.notifier,
        &state.config.admin_email,
        input,
    )
    .await?;
    Ok(ApiResponse::created("Successfully saved order", order))
}

/// GET /api/v1/orders?page=&limit=&status=
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> AppResult<Json<ApiResponse<OrderListResponse>>> {
    let listing = orders::list(&state.pool, params.page(), params.filter()).await?;
    Ok(ApiResponse::ok("Successfully retrieved orders.", listing))
}

/// GET /api/v1/orders/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = orders::get(&state.pool, &id).await?;
    Ok(ApiResponse::ok("Successfully found order", order))
}

/// GET /api/v1/orders/user/{user_id}
pub async fn list_for_user(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = orders::list_for_user(&state.pool, &user_id, params.page()).await?;
    Ok(ApiResponse::ok("Successfully retrieved orders.", orders))
}

/// PUT /api/v1/orders/{id}/status
pub async fn update_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = orders::update_status(&state.pool, &id, input).await?;
    Ok(ApiResponse::ok("Successfully updated order status", order))
}
