pub mod admin;
pub mod contact;
pub mod health;
pub mod orders;
pub mod posts;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/login                     admin token (public)
/// /admin/get_users                 paginated users (admin)
///
/// /contact                         contact form (public)
///
/// /users/token                     user token from session id (public)
/// /users                           register (auth)
/// /users/{id}                      get (auth)
/// /users/{id}/membership           change membership (auth)
///
/// /orders                          create (auth), list + counts (admin)
/// /orders/user/{user_id}           a user's orders (auth)
/// /orders/{id}                     get (auth)
/// /orders/{id}/status              status transition (admin)
///
/// /posts                           published list (public), create (admin)
/// /posts/drafts                    draft list (admin)
/// /posts/upload-image              inline image upload (admin)
/// /posts/{id}                      get (public), update, delete (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/admin", admin::router())
        .nest("/contact", contact::router())
        .nest("/users", users::router())
        .nest("/orders", orders::router())
        .nest("/posts", posts::router())
}
