use crate::traits::{StorageError, StorageResult, UploadStorage};
use crate::upload::{LiveUploads, UploadedFile};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Local filesystem upload directory
#[derive(Clone, Debug)]
pub struct LocalUploadStore {
    base_path: PathBuf,
    live: LiveUploads,
}

impl LocalUploadStore {
    /// Create the store, creating `base_path` (and parents) if missing.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create upload directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalUploadStore {
            base_path,
            live: LiveUploads::new(),
        })
    }

    fn file_path(&self, id: Uuid, extension: &str) -> PathBuf {
        self.base_path.join(format!("{}{}", id, extension))
    }

    async fn write_new(path: &Path, data: &[u8]) -> StorageResult<()> {
        // create_new: a uuid collision fails instead of clobbering another request's file
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
            .map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl UploadStorage for LocalUploadStore {
    async fn save(&self, extension: &str, data: Bytes) -> StorageResult<UploadedFile> {
        if extension.contains(['/', '\\']) || extension.contains("..") {
            return Err(StorageError::UploadFailed(format!(
                "Invalid file extension: {}",
                extension
            )));
        }

        let id = Uuid::new_v4();
        let path = self.file_path(id, extension);
        let size = data.len();
        let start = std::time::Instant::now();

        if let Err(e) = Self::write_new(&path, &data).await {
            // Partial writes must not linger until the next sweep
            if let Err(cleanup) = fs::remove_file(&path).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        error = %cleanup,
                        path = %path.display(),
                        "Failed to remove partially written upload"
                    );
                }
            }
            return Err(e);
        }

        tracing::debug!(
            path = %path.display(),
            upload_id = %id,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Saved uploaded file"
        );

        Ok(UploadedFile::new(
            id,
            path,
            extension.to_string(),
            size,
            self.live.clone(),
        ))
    }

    async fn delete(&self, path: &Path) -> StorageResult<()> {
        match fs::remove_file(path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Deleted uploaded file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn root(&self) -> &Path {
        &self.base_path
    }

    fn is_live(&self, path: &Path) -> bool {
        self.live.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn store() -> (TempDir, LocalUploadStore) {
        let dir = TempDir::new().unwrap();
        let store = LocalUploadStore::new(dir.path().join("uploads"))
            .await
            .unwrap();
        (dir, store)
    }

    fn entries(path: &Path) -> usize {
        std::fs::read_dir(path).unwrap().count()
    }

    #[tokio::test]
    async fn test_new_creates_directory() {
        let (dir, store) = store().await;
        assert!(dir.path().join("uploads").is_dir());
        assert_eq!(store.root(), dir.path().join("uploads"));
    }

    #[tokio::test]
    async fn test_save_writes_uuid_named_file() {
        let (_dir, store) = store().await;
        let upload = store
            .save(".pdf", Bytes::from_static(b"%PDF-1.4\n%"))
            .await
            .unwrap();

        assert_eq!(upload.size(), 10);
        assert_eq!(upload.extension(), ".pdf");
        assert!(upload.path().to_string_lossy().ends_with(".pdf"));
        assert_eq!(
            upload.path().file_name().unwrap().to_string_lossy(),
            format!("{}.pdf", upload.id())
        );
        assert_eq!(std::fs::read(upload.path()).unwrap(), b"%PDF-1.4\n%");
    }

    #[tokio::test]
    async fn test_saves_never_collide() {
        let (_dir, store) = store().await;
        let a = store.save(".pdf", Bytes::from_static(b"a")).await.unwrap();
        let b = store.save(".pdf", Bytes::from_static(b"b")).await.unwrap();
        assert_ne!(a.path(), b.path());
        assert_eq!(entries(store.root()), 2);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_dir, store) = store().await;
        let upload = store.save(".pdf", Bytes::from_static(b"x")).await.unwrap();
        let path = upload.disarm();

        store.delete(&path).await.unwrap();
        assert!(!path.exists());
        store.delete(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_drop_removes_armed_upload() {
        let (_dir, store) = store().await;
        let upload = store.save(".pdf", Bytes::from_static(b"x")).await.unwrap();
        let path = upload.path().to_path_buf();
        drop(upload);
        assert!(!store.is_live(&path));

        // Removal happens on the blocking pool
        for _ in 0..100 {
            if !path.exists() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_disarm_keeps_file() {
        let (_dir, store) = store().await;
        let upload = store.save(".pdf", Bytes::from_static(b"x")).await.unwrap();
        let path = upload.disarm();
        assert!(path.exists());
        assert!(!store.is_live(&path));
    }

    #[tokio::test]
    async fn test_saved_upload_is_live_until_released() {
        let (_dir, store) = store().await;
        let upload = store.save(".pdf", Bytes::from_static(b"x")).await.unwrap();
        let path = upload.path().to_path_buf();
        assert!(store.is_live(&path));

        let clone = store.clone();
        assert!(clone.is_live(&path));

        upload.disarm();
        assert!(!store.is_live(&path));
    }

    #[tokio::test]
    async fn test_save_fails_when_directory_is_gone() {
        let (_dir, store) = store().await;
        std::fs::remove_dir(store.root()).unwrap();

        let err = store
            .save(".pdf", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UploadFailed(_)));
    }

    #[tokio::test]
    async fn test_rejects_path_like_extension() {
        let (_dir, store) = store().await;
        let err = store
            .save("/../x", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UploadFailed(_)));
        assert_eq!(entries(store.root()), 0);
    }
}
