//! Storage abstraction trait

use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;
use thiserror::Error;

use crate::upload::UploadedFile;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Where request uploads live while they are being converted.
#[async_trait]
pub trait UploadStorage: Send + Sync {
    /// Persist `data` under a fresh `<uuid><extension>` name.
    ///
    /// `extension` is expected lower-cased with its leading dot.
    async fn save(&self, extension: &str, data: Bytes) -> StorageResult<UploadedFile>;

    /// Delete a stored upload. Deleting a file that no longer exists succeeds.
    async fn delete(&self, path: &Path) -> StorageResult<()>;

    /// Directory uploads are written to
    fn root(&self) -> &Path;

    /// Whether a request still holds an armed [`UploadedFile`] for `path`.
    fn is_live(&self, path: &Path) -> bool;
}
