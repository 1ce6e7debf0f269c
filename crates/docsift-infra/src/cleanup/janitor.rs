use docsift_storage::{UploadStorage, UploadedFile};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::time::{interval, MissedTickBehavior};

/// Outcome of one sweep across all scan directories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Regular files inspected
    pub scanned: usize,
    pub deleted: usize,
    pub failed: usize,
    /// Expired files skipped because a request still holds them
    pub in_use: usize,
}

#[derive(Clone)]
pub struct Janitor {
    storage: Arc<dyn UploadStorage>,
    scan_dirs: Vec<PathBuf>,
    retention: Duration,
    sweep_interval: Option<Duration>,
    cleanup_after_processing: bool,
}

impl Janitor {
    pub fn new(storage: Arc<dyn UploadStorage>, scan_dirs: Vec<PathBuf>, retention: Duration) -> Self {
        Self {
            storage,
            scan_dirs,
            retention,
            sweep_interval: None,
            cleanup_after_processing: true,
        }
    }

    /// Periodic sweep interval; `None` disables the background task.
    pub fn with_interval(mut self, sweep_interval: Option<Duration>) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }

    /// Whether `release` deletes an upload immediately or leaves it for the sweep.
    pub fn with_cleanup_after_processing(mut self, enabled: bool) -> Self {
        self.cleanup_after_processing = enabled;
        self
    }

    pub fn cleanup_after_processing(&self) -> bool {
        self.cleanup_after_processing
    }

    /// End-of-request cleanup for one upload. Never fails: a missing file is
    /// fine and a failed delete is only logged.
    pub async fn release(&self, upload: UploadedFile) {
        if !self.cleanup_after_processing {
            let path = upload.disarm();
            tracing::debug!(file_path = %path.display(), "Leaving upload for scheduled sweep");
            return;
        }

        if let Err(e) = self.storage.delete(upload.path()).await {
            tracing::warn!(
                error = %e,
                file_path = %upload.path().display(),
                "Failed to delete file"
            );
        }
        upload.disarm();
    }

    /// Start the background sweep task
    /// Returns a JoinHandle for graceful shutdown, or `None` when no interval is set
    pub fn start(self: Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        let period = self.sweep_interval?;

        Some(tokio::spawn(async move {
            let mut sweep_interval = interval(period);
            sweep_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                sweep_interval.tick().await;
                tracing::debug!("Starting scheduled sweep of stale uploads");
                self.sweep().await;
            }
        }))
    }

    /// Delete every regular file in the scan directories whose last
    /// modification is older than the retention window. Uploads still held
    /// by an in-flight request are never touched, whatever their age.
    #[tracing::instrument(skip(self), fields(retention_secs = self.retention.as_secs()))]
    pub async fn sweep(&self) -> SweepReport {
        let mut report = SweepReport::default();
        let now = SystemTime::now();

        for dir in &self.scan_dirs {
            self.sweep_dir(dir, now, &mut report).await;
        }

        tracing::info!(
            scanned = report.scanned,
            deleted = report.deleted,
            failed = report.failed,
            in_use = report.in_use,
            "Sweep completed"
        );

        report
    }

    async fn sweep_dir(&self, dir: &Path, now: SystemTime, report: &mut SweepReport) {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, dir = %dir.display(), "Cannot read sweep directory");
                return;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, dir = %dir.display(), "Failed to list sweep directory");
                    break;
                }
            };

            let path = entry.path();
            // Symlinks and directories are left alone
            let metadata = match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(error = %e, file_path = %path.display(), "Failed to stat file");
                    report.failed += 1;
                    continue;
                }
            };
            report.scanned += 1;

            let expired = match metadata.modified() {
                Ok(modified) => now
                    .duration_since(modified)
                    .map(|age| age > self.retention)
                    .unwrap_or(false),
                Err(e) => {
                    tracing::warn!(error = %e, file_path = %path.display(), "No modification time");
                    false
                }
            };
            if !expired {
                continue;
            }

            if self.storage.is_live(&path) {
                tracing::debug!(file_path = %path.display(), "Skipping upload still in use");
                report.in_use += 1;
                continue;
            }

            // A file already gone (released by its request mid-sweep) counts as deleted
            match self.storage.delete(&path).await {
                Ok(()) => {
                    tracing::debug!(file_path = %path.display(), "Deleted old file");
                    report.deleted += 1;
                }
                Err(e) => {
                    tracing::warn!(error = %e, file_path = %path.display(), "Failed to delete old file");
                    report.failed += 1;
                }
            }
        }
    }
}
