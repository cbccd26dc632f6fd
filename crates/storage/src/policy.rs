//! Upload validation and object naming.

use belva_core::uploads::{file_extension, validate_upload};

use crate::error::StorageError;

/// A file received from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Client-supplied file name; only its extension is kept.
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Check size and content type, then derive the stored object name.
    pub fn checked_object_name(&self) -> Result<String, StorageError> {
        validate_upload(&self.content_type, self.bytes.len())?;
        object_name(&self.file_name)
    }
}

/// Generated object name: a dash-less random UUID plus the original
/// extension.
pub fn object_name(original: &str) -> Result<String, StorageError> {
    let ext = file_extension(original)?;
    Ok(format!("{}.{ext}", uuid::Uuid::new_v4().simple()))
}
