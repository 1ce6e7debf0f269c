//! Shared upload-to-document flow behind every conversion endpoint

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;
use axum::extract::Multipart;
use docsift_services::ConvertedDocument;
use std::time::{Duration, Instant};

pub struct ConvertedUpload {
    pub filename: String,
    pub document: ConvertedDocument,
    /// Intake plus conversion, excluding export
    pub elapsed: Duration,
}

/// Readiness check, intake, conversion and cleanup for one request.
///
/// The stored upload is released whether or not conversion succeeded; a
/// failed release is logged by the janitor and never changes the outcome.
pub async fn convert_upload(
    state: &AppState,
    multipart: Multipart,
) -> Result<ConvertedUpload, HttpAppError> {
    let gateway = state.converter.acquire().await?;
    let started = Instant::now();

    let file = extract_multipart_file(multipart, state.validator.max_file_size()).await?;
    let extension = state.validator.validate(&file.filename, file.data.len())?;
    let upload = state.storage.save(&extension, file.data).await?;

    tracing::info!(
        filename = %file.filename,
        upload_id = %upload.id(),
        size_bytes = upload.size(),
        "Processing upload"
    );

    let result = gateway.convert(upload.path()).await;
    state.janitor.release(upload).await;

    Ok(ConvertedUpload {
        filename: file.filename,
        document: result?,
        elapsed: started.elapsed(),
    })
}
