use belva_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The file failed the upload policy (extension, size, content type).
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The storage service answered with a non-2xx status.
    #[error("Storage returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

impl From<CoreError> for StorageError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Rejected(msg),
            other => Self::Rejected(other.to_string()),
        }
    }
}
