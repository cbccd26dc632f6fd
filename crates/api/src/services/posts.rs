//! Blog posts: CRUD, cover images and inline body images.
//!
//! Cover images live at `blog-cover-photos/<post id>/` and inline images at
//! `blog-body-photos/<post id>/`. The row stores the cover's storage key;
//! responses carry its public URL.

use belva_core::error::CoreError;
use belva_core::pagination::Page;
use belva_core::post_status::PostStatus;
use belva_core::types::DbId;
use belva_core::uploads::{validate_inline_image_type, BODY_IMAGE_BUCKET, COVER_IMAGE_BUCKET};
use belva_db::models::post::{CreatePost, PostResponse, UpdatePost};
use belva_db::repositories::post_repo::SLUG_CONSTRAINT;
use belva_db::repositories::PostRepo;
use belva_db::{is_unique_violation, DbPool};
use belva_storage::{ObjectStorage, UploadFile};
use serde::Serialize;

use crate::error::{AppError, AppResult};

const SLUG_TAKEN: &str = "Post with this slug exists";

/// Fields of the create/update multipart form.
#[derive(Debug, Default)]
pub struct PostForm {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub status: Option<String>,
    pub cover_image: Option<UploadFile>,
}

/// Fields of the inline image multipart form.
#[derive(Debug, Default)]
pub struct InlineImageForm {
    pub post_id: String,
    pub image: Option<UploadFile>,
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct UploadImageResponse {
    pub image_url: String,
    pub file_name: String,
}

impl PostForm {
    fn checked(&self) -> Result<PostStatus, CoreError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title is required");
        }
        if self.slug.trim().is_empty() {
            missing.push("slug is required");
        }
        if !missing.is_empty() {
            return Err(CoreError::Validation(missing.join(", ")));
        }
        PostStatus::parse(self.status.as_deref())
    }
}

fn render(storage: &dyn ObjectStorage) -> impl Fn(&str) -> String + '_ {
    move |key| storage.public_url(key)
}

/// Remove an object whose loss only leaves an orphan behind.
async fn discard(storage: &dyn ObjectStorage, key: &str) {
    if let Err(e) = storage.remove(key).await {
        tracing::warn!(key, error = %e, "Failed to remove stored image");
    }
}

pub async fn create(
    pool: &DbPool,
    storage: &dyn ObjectStorage,
    form: PostForm,
) -> AppResult<PostResponse> {
    let status = form.checked()?;
    let id = DbId::new_v4();

    let cover_image = match form.cover_image {
        Some(file) => {
            storage
                .upload(COVER_IMAGE_BUCKET, &id.to_string(), file)
                .await?
                .key
        }
        None => String::new(),
    };

    let input = CreatePost {
        id,
        title: form.title.trim().to_string(),
        slug: form.slug.trim().to_string(),
        content: form.content,
        cover_image,
        status,
    };

    match PostRepo::create(pool, &input).await {
        Ok(post) => {
            tracing::info!(post_id = %post.id, slug = %post.slug, "Post created");
            Ok(post.into_response(render(storage)))
        }
        Err(e) => {
            if !input.cover_image.is_empty() {
                discard(storage, &input.cover_image).await;
            }
            if is_unique_violation(&e, SLUG_CONSTRAINT) {
                Err(CoreError::Conflict(SLUG_TAKEN.into()).into())
            } else {
                Err(e.into())
            }
        }
    }
}

pub async fn get(pool: &DbPool, storage: &dyn ObjectStorage, raw_id: &str) -> AppResult<PostResponse> {
    let id = super::parse_id(raw_id, "Post")?;
    let post = PostRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Post"))?;
    Ok(post.into_response(render(storage)))
}

/// Newest first, with the total number of posts in `status`.
pub async fn list(
    pool: &DbPool,
    storage: &dyn ObjectStorage,
    status: PostStatus,
    page: Page,
) -> AppResult<PostListResponse> {
    let (posts, total) = PostRepo::list_by_status(pool, status, page.offset(), page.limit).await?;
    Ok(PostListResponse {
        posts: posts
            .into_iter()
            .map(|p| p.into_response(render(storage)))
            .collect(),
        total,
    })
}

/// Replace title, slug, content and status. A new cover image replaces the
/// old one, which is then removed best-effort.
pub async fn update(
    pool: &DbPool,
    storage: &dyn ObjectStorage,
    raw_id: &str,
    form: PostForm,
) -> AppResult<PostResponse> {
    let id = super::parse_id(raw_id, "Post")?;
    let existing = PostRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Post"))?;
    let status = form.checked()?;

    let new_cover = match form.cover_image {
        Some(file) => Some(
            storage
                .upload(COVER_IMAGE_BUCKET, &id.to_string(), file)
                .await?
                .key,
        ),
        None => None,
    };

    let input = UpdatePost {
        title: form.title.trim().to_string(),
        slug: form.slug.trim().to_string(),
        content: form.content,
        cover_image: new_cover.clone(),
        status,
    };

    let updated = match PostRepo::update(pool, id, &input).await {
        Ok(row) => row,
        Err(e) => {
            if let Some(key) = &new_cover {
                discard(storage, key).await;
            }
            return Err(if is_unique_violation(&e, SLUG_CONSTRAINT) {
                CoreError::Conflict(SLUG_TAKEN.into()).into()
            } else {
                AppError::from(e)
            });
        }
    };
    let post = updated.ok_or_else(|| CoreError::not_found("Post"))?;

    if new_cover.is_some() && !existing.cover_image.is_empty() {
        discard(storage, &existing.cover_image).await;
    }

    tracing::info!(post_id = %post.id, "Post updated");
    Ok(post.into_response(render(storage)))
}

/// Delete the row, then remove its cover image and inline image folder.
/// Blob failures are logged and never undo the deletion.
pub async fn delete(pool: &DbPool, storage: &dyn ObjectStorage, raw_id: &str) -> AppResult<()> {
    let id = super::parse_id(raw_id, "Post")?;
    let post = PostRepo::delete(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Post"))?;
    tracing::info!(post_id = %post.id, "Post deleted");

    if !post.cover_image.is_empty() {
        discard(storage, &post.cover_image).await;
    }
    if let Err(e) = storage
        .remove_folder(BODY_IMAGE_BUCKET, &post.id.to_string())
        .await
    {
        tracing::warn!(post_id = %post.id, error = %e, "Failed to remove inline images");
    }
    Ok(())
}

/// Store an inline body image for a post. The post need not exist yet.
pub async fn upload_inline_image(
    storage: &dyn ObjectStorage,
    form: InlineImageForm,
) -> AppResult<UploadImageResponse> {
    let post_id: DbId = form
        .post_id
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation("post_id must be a valid UUID".into()))?;
    let image = form
        .image
        .ok_or_else(|| CoreError::Validation("image is required".into()))?;
    validate_inline_image_type(&image.content_type)?;

    let stored = storage
        .upload(BODY_IMAGE_BUCKET, &post_id.to_string(), image)
        .await?;
    Ok(UploadImageResponse {
        image_url: storage.public_url(&stored.key),
        file_name: stored.file_name,
    })
}
