//! Handler for `POST /contact`.

use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::body::AppJson;
use crate::response::ApiResponse;
use crate::services::contact::{self, ContactRequest};
use crate::state::AppState;

/// POST /api/v1/contact
pub async fn send(
    State(state): State<AppState>,
    AppJson(input): AppJson<ContactRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    contact::send(
        state.notifier.mailer().as_ref(),
        &state.config.admin_email,
        &input,
    )
    .await?;
    Ok(ApiResponse::message("Your message has been sent successfully"))
}
