//! Handlers for the `/posts` resource.
//!
//! Create, update and inline-image upload take `multipart/form-data`; the
//! read endpoints are public.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use belva_core::post_status::PostStatus;
use belva_db::models::post::PostResponse;
use belva_storage::UploadFile;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::ApiResponse;
use crate::services::posts::{self, InlineImageForm, PostForm, PostListResponse, UploadImageResponse};
use crate::state::AppState;

/// Read a file field. A field with no file name or no bytes counts as absent,
/// which is what browsers send for an empty file input.
async fn read_file(field: axum::extract::multipart::Field<'_>) -> AppResult<Option<UploadFile>> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field.bytes().await?;

    if file_name.is_empty() || bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(UploadFile {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

async fn read_post_form(mut multipart: Multipart) -> AppResult<PostForm> {
    let mut form = PostForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => form.title = field.text().await?,
            "slug" => form.slug = field.text().await?,
            "content" => form.content = field.text().await?,
            "status" => form.status = Some(field.text().await?),
            "cover_image" => form.cover_image = read_file(field).await?,
            _ => {} // ignore unknown fields
        }
    }
    Ok(form)
}

/// POST /api/v1/posts
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<PostResponse>>)> {
    let form = read_post_form(multipart).await?;
    let post = posts::create(&state.pool, state.storage.as_ref(), form).await?;
    Ok(ApiResponse::created("Successfully saved post", post))
}

/// GET /api/v1/posts
pub async fn list_published(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<PostListResponse>>> {
    let listing = posts::list(
        &state.pool,
        state.storage.as_ref(),
        PostStatus::Published,
        params.page(),
    )
    .await?;
    Ok(ApiResponse::ok("Successfully retrieved posts", listing))
}

/// GET /api/v1/posts/drafts
pub async fn list_drafts(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<PostListResponse>>> {
    let listing = posts::list(
        &state.pool,
        state.storage.as_ref(),
        PostStatus::Draft,
        params.page(),
    )
    .await?;
    Ok(ApiResponse::ok("Successfully retrieved draft posts", listing))
}

/// GET /api/v1/posts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<PostResponse>>> {
    let post = posts::get(&state.pool, state.storage.as_ref(), &id).await?;
    Ok(ApiResponse::ok("Successfully found post", post))
}

/// PUT /api/v1/posts/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<PostResponse>>> {
    let form = read_post_form(multipart).await?;
    let post = posts::update(&state.pool, state.storage.as_ref(), &id, form).await?;
    Ok(ApiResponse::ok("Successfully updated post", post))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    posts::delete(&state.pool, state.storage.as_ref(), &id).await?;
    Ok(ApiResponse::message("Successfully deleted post"))
}

/// POST /api/v1/posts/upload-image
pub async fn upload_image(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<UploadImageResponse>>)> {
    let mut form = InlineImageForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "post_id" => form.post_id = field.text().await?,
            "image" => form.image = read_file(field).await?,
            _ => {}
        }
    }

    let image = posts::upload_inline_image(state.storage.as_ref(), form).await?;
    Ok(ApiResponse::created("Successfully uploaded image", image))
}
