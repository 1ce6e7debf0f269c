//! Upload store wrappers for exercising failure paths.

use async_trait::async_trait;
use bytes::Bytes;
use docsift_storage::{LocalUploadStore, StorageError, StorageResult, UploadStorage, UploadedFile};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Saves like the local store but refuses every delete.
pub struct UndeletableStore {
    inner: LocalUploadStore,
    delete_attempts: AtomicUsize,
}

impl UndeletableStore {
    pub fn new(inner: LocalUploadStore) -> Self {
        Self {
            inner,
            delete_attempts: AtomicUsize::new(0),
        }
    }

    pub fn delete_attempts(&self) -> usize {
        self.delete_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UploadStorage for UndeletableStore {
    async fn save(&self, extension: &str, data: Bytes) -> StorageResult<UploadedFile> {
        self.inner.save(extension, data).await
    }

    async fn delete(&self, path: &Path) -> StorageResult<()> {
        self.delete_attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::DeleteFailed(format!(
            "Failed to delete file {}: Read-only file system",
            path.display()
        )))
    }

    fn root(&self) -> &Path {
        self.inner.root()
    }

    fn is_live(&self, path: &Path) -> bool {
        self.inner.is_live(path)
    }
}
