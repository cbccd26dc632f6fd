//! Repository for the `posts` table.

use belva_core::post_status::PostStatus;
use belva_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{CreatePost, Post, UpdatePost};

const COLUMNS: &str = "id, title, slug, content, cover_image, status, created_at, updated_at";

/// Unique constraint on `posts.slug`.
pub const SLUG_CONSTRAINT: &str = "uq_posts_slug";

/// Provides CRUD operations for blog posts.
pub struct PostRepo;

impl PostRepo {
    pub async fn create(pool: &PgPool, input: &CreatePost) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (id, title, slug, content, cover_image, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(input.id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.content)
            .bind(&input.cover_image)
            .bind(input.status.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of posts in `status`, newest first, with the total number of
    /// posts in that status.
    pub async fn list_by_status(
        pool: &PgPool,
        status: PostStatus,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Post>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts
             WHERE status = $1
             ORDER BY created_at DESC, id
             LIMIT $2 OFFSET $3"
        );
        let posts = sqlx::query_as::<_, Post>(&query)
            .bind(status.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(pool)
            .await?;

        Ok((posts, total))
    }

    /// Replace a post's editable fields. A `None` cover image keeps the
    /// stored key.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET
                title = $2,
                slug = $3,
                content = $4,
                cover_image = COALESCE($5, cover_image),
                status = $6,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.content)
            .bind(&input.cover_image)
            .bind(input.status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete a post inside a transaction, returning the removed row so the
    /// caller can clean up its blobs after commit.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!("DELETE FROM posts WHERE id = $1 RETURNING {COLUMNS}");
        let deleted = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(deleted)
    }
}
