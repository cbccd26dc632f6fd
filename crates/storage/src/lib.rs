//! Object storage for blog images.
//!
//! [`ObjectStorage`] is the seam the api crate talks to; [`SupabaseStorage`]
//! implements it against a Supabase-compatible storage REST API. Keys have the
//! form `<bucket>/<folder>/<object name>` and are what the database stores.

pub mod error;
pub mod policy;
pub mod supabase;

use async_trait::async_trait;

pub use error::StorageError;
pub use policy::{object_name, UploadFile};
pub use supabase::{StorageConfig, SupabaseStorage};

/// Where an uploaded file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Full key including the bucket, e.g. `blog-cover-photos/<post>/<name>.png`.
    pub key: String,
    /// Generated object name (last key segment).
    pub file_name: String,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Validate `file` against the upload policy and store it under
    /// `<bucket>/<folder>/` with a generated name.
    async fn upload(
        &self,
        bucket: &str,
        folder: &str,
        file: UploadFile,
    ) -> Result<StoredObject, StorageError>;

    /// Remove a single object by its full key.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every object under `<bucket>/<folder>/`. Returns how many were
    /// removed.
    async fn remove_folder(&self, bucket: &str, folder: &str) -> Result<usize, StorageError>;

    /// Public URL for a stored key.
    fn public_url(&self, key: &str) -> String;
}

/// Split a full key into `(bucket, path)`.
pub fn split_key(key: &str) -> Result<(&str, &str), StorageError> {
    match key.split_once('/') {
        Some((bucket, path)) if !bucket.is_empty() && !path.is_empty() => Ok((bucket, path)),
        _ => Err(StorageError::InvalidKey(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_key_separates_bucket() {
        let (bucket, path) = split_key("blog-cover-photos/abc/def.png").unwrap();
        assert_eq!(bucket, "blog-cover-photos");
        assert_eq!(path, "abc/def.png");
    }

    #[test]
    fn split_key_rejects_bare_bucket() {
        assert!(split_key("blog-cover-photos").is_err());
        assert!(split_key("blog-cover-photos/").is_err());
        assert!(split_key("/abc").is_err());
    }
}
