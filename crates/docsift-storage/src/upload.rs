use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Paths of uploads that a request still owns.
///
/// Shared between a store and every [`UploadedFile`] it hands out, so the
/// time-based sweep can tell a file mid-conversion from an abandoned one.
#[derive(Clone, Debug, Default)]
pub struct LiveUploads {
    paths: Arc<Mutex<HashSet<PathBuf>>>,
}

impl LiveUploads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.lock().contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn insert(&self, path: PathBuf) {
        self.lock().insert(path);
    }

    fn remove(&self, path: &Path) {
        self.lock().remove(path);
    }

    // The set stays consistent across a panic, so a poisoned lock is still usable
    fn lock(&self) -> MutexGuard<'_, HashSet<PathBuf>> {
        self.paths.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// One request's stored upload.
///
/// While armed, dropping the value removes the file from disk, so an upload
/// never outlives a request that was cancelled or unwound before it could
/// clean up. Call [`UploadedFile::disarm`] to hand the file over to the
/// janitor's time-based sweep instead.
///
/// The path is registered in [`LiveUploads`] for as long as the guard is
/// armed; the sweep leaves registered paths alone.
#[derive(Debug)]
pub struct UploadedFile {
    id: Uuid,
    path: PathBuf,
    extension: String,
    size: usize,
    armed: bool,
    live: LiveUploads,
}

impl UploadedFile {
    pub(crate) fn new(
        id: Uuid,
        path: PathBuf,
        extension: String,
        size: usize,
        live: LiveUploads,
    ) -> Self {
        live.insert(path.clone());
        Self {
            id,
            path,
            extension,
            size,
            armed: true,
            live,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Stop the drop guard and return the path, leaving the file on disk.
    pub fn disarm(mut self) -> PathBuf {
        self.armed = false;
        self.live.remove(&self.path);
        std::mem::take(&mut self.path)
    }
}

fn remove_quietly(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed upload on drop");
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(
                error = %e,
                path = %path.display(),
                "Failed to remove upload on drop"
            );
        }
    }
}

impl Drop for UploadedFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.live.remove(&self.path);
        let path = std::mem::take(&mut self.path);

        // Drop runs on a runtime worker when a request future is cancelled,
        // so the unlink goes to the blocking pool whenever one is available
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || remove_quietly(&path));
            }
            Err(_) => remove_quietly(&path),
        }
    }
}
