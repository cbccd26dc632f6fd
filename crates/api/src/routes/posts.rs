//! Route definitions for the `/posts` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use belva_core::uploads::MAX_UPLOAD_BYTES;

use crate::handlers::posts;
use crate::state::AppState;

/// Room for the form fields around a maximum-size file. Oversized files still
/// reach the upload policy and get its message.
const BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

/// Routes mounted at `/posts`.
///
/// ```text
/// GET    /               -> list_published
/// POST   /               -> create (admin, multipart)
/// GET    /drafts         -> list_drafts (admin)
/// POST   /upload-image   -> upload_image (admin, multipart)
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update (admin, multipart)
/// DELETE /{id}           -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_published).post(posts::create))
        .route("/drafts", get(posts::list_drafts))
        .route("/upload-image", post(posts::upload_image))
        .route(
            "/{id}",
            get(posts::get_by_id)
                .put(posts::update)
                .delete(posts::delete),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}
