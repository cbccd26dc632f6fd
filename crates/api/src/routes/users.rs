//! Route definitions for the `/users` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST /                 -> register
/// POST /token            -> issue_token (public)
/// GET  /{id}             -> get_by_id
/// PUT  /{id}/membership  -> update_membership
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::register))
        .route("/token", post(users::issue_token))
        .route("/{id}", get(users::get_by_id))
        .route("/{id}/membership", put(users::update_membership))
}
