//! Route definitions for the `/orders` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// GET  /                 -> list (admin)
/// POST /                 -> create
/// GET  /user/{user_id}   -> list_for_user
/// GET  /{id}             -> get_by_id
/// PUT  /{id}/status      -> update_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list).post(orders::create))
        .route("/user/{user_id}", get(orders::list_for_user))
        .route("/{id}", get(orders::get_by_id))
        .route("/{id}/status", put(orders::update_status))
}
