//! Upload policy shared by the storage client and the post handlers.

use crate::error::CoreError;

/// Largest accepted upload (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Bucket holding post cover images, one folder per post id.
pub const COVER_IMAGE_BUCKET: &str = "blog-cover-photos";

/// Bucket holding inline post-body images, one folder per post id.
pub const BODY_IMAGE_BUCKET: &str = "blog-body-photos";

/// Content types accepted by the inline image endpoint.
pub const INLINE_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

/// Extension of `filename` without the dot. Errors when there is none.
pub fn file_extension(filename: &str) -> Result<&str, CoreError> {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && !ext.contains('/') => Ok(ext),
        _ => Err(CoreError::Validation("invalid file extension".into())),
    }
}

/// General upload check: size within [`MAX_UPLOAD_BYTES`] and an image or PDF
/// content type.
pub fn validate_upload(content_type: &str, size: usize) -> Result<(), CoreError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation("file size exceeds 5MB limit".into()));
    }
    if !content_type.starts_with("image/") && content_type != "application/pdf" {
        return Err(CoreError::Validation(
            "file is neither an image nor a PDF".into(),
        ));
    }
    Ok(())
}

/// Inline image check: JPEG, PNG or GIF only.
pub fn validate_inline_image_type(content_type: &str) -> Result<(), CoreError> {
    if INLINE_IMAGE_TYPES.contains(&content_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Invalid file type. Only JPEG, PNG, and GIF are allowed".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_extracted() {
        assert_eq!(file_extension("cover.photo.png").unwrap(), "png");
        assert_eq!(file_extension("scan.PDF").unwrap(), "PDF");
    }

    #[test]
    fn missing_extension_is_rejected() {
        assert!(file_extension("cover").is_err());
        assert!(file_extension("cover.").is_err());
        assert!(file_extension(".gitignore").is_err());
    }

    #[test]
    fn upload_size_limit() {
        assert!(validate_upload("image/png", MAX_UPLOAD_BYTES).is_ok());
        let err = validate_upload("image/png", MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert!(err.to_string().contains("5MB"));
    }

    #[test]
    fn upload_content_types() {
        assert!(validate_upload("image/webp", 10).is_ok());
        assert!(validate_upload("application/pdf", 10).is_ok());
        assert!(validate_upload("text/plain", 10).is_err());
    }

    #[test]
    fn inline_allow_list() {
        for ty in INLINE_IMAGE_TYPES {
            assert!(validate_inline_image_type(ty).is_ok());
        }
        assert!(validate_inline_image_type("image/webp").is_err());
        assert!(validate_inline_image_type("application/pdf").is_err());
    }
}
