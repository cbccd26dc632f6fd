//! Blog post entity model and DTOs.

use belva_core::post_status::PostStatus;
use belva_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `posts` table. `cover_image` is a storage key, not a URL.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub cover_image: String,
    #[sqlx(try_from = "String")]
    pub status: PostStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// API representation of a post with the cover image rendered as a URL.
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub cover_image: String,
    pub status: PostStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Post {
    /// Build the response, rendering the cover image key through `render_url`.
    /// Posts without a cover image keep an empty string.
    pub fn into_response(self, render_url: impl FnOnce(&str) -> String) -> PostResponse {
        let cover_image = if self.cover_image.is_empty() {
            String::new()
        } else {
            render_url(&self.cover_image)
        };
        PostResponse {
            id: self.id,
            title: self.title,
            slug: self.slug,
            content: self.content,
            cover_image,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// DTO for inserting a post. The id is chosen up front so the cover image
/// can be uploaded under the post's folder before the row exists.
#[derive(Debug, Clone)]
pub struct CreatePost {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub cover_image: String,
    pub status: PostStatus,
}

/// DTO for replacing a post's editable fields. `cover_image: None` keeps the
/// stored key.
#[derive(Debug, Clone)]
pub struct UpdatePost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub status: PostStatus,
}
