//! Service initialization and application state setup

use crate::state::AppState;
use anyhow::Context;
use docsift_core::Config;
use docsift_infra::Janitor;
use docsift_processing::UploadValidator;
use docsift_services::ConverterSlot;
use docsift_storage::{LocalUploadStore, UploadStorage};
use std::sync::Arc;

/// Build the shared state around an existing converter slot.
///
/// Creates the upload and temp directories when missing.
pub async fn initialize_services(config: &Config, converter: ConverterSlot) -> anyhow::Result<Arc<AppState>> {
    let storage: Arc<dyn UploadStorage> = Arc::new(
        LocalUploadStore::new(config.upload_dir())
            .await
            .context("Failed to prepare upload directory")?,
    );

    initialize_services_with_storage(config, converter, storage).await
}

/// Same as [`initialize_services`] with a caller-provided upload store.
pub async fn initialize_services_with_storage(
    config: &Config,
    converter: ConverterSlot,
    storage: Arc<dyn UploadStorage>,
) -> anyhow::Result<Arc<AppState>> {
    tokio::fs::create_dir_all(config.temp_dir())
        .await
        .with_context(|| format!("Failed to create temp directory {}", config.temp_dir().display()))?;

    let janitor = Arc::new(
        Janitor::new(storage.clone(), config.scan_dirs(), config.retention())
            .with_interval(config.cleanup_interval())
            .with_cleanup_after_processing(config.uploads.cleanup_after_processing),
    );

    let validator = UploadValidator::new(config.max_file_size(), config.allowed_extensions().to_vec());

    tracing::info!(
        upload_dir = %storage.root().display(),
        temp_dir = %config.temp_dir().display(),
        max_file_size_mb = config.max_file_size() / 1024 / 1024,
        allowed_extensions = %config.allowed_extensions().join(","),
        cleanup_after_processing = janitor.cleanup_after_processing(),
        "Upload intake initialized"
    );

    Ok(Arc::new(AppState {
        config: config.clone(),
        converter,
        validator,
        storage,
        janitor,
    }))
}
