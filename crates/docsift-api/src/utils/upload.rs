//! Common utilities for file upload handlers

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;
use docsift_core::{constants::UPLOAD_FIELD_NAME, AppError};

/// File part of an upload request
#[derive(Debug)]
pub struct MultipartFile {
    pub filename: String,
    pub data: Bytes,
}

/// Extract the single `file` field from a multipart form.
/// Other fields are ignored; a second `file` field is rejected.
///
/// `max_file_size` is only used to describe a body that blew the request
/// limit, which surfaces here as a multipart read error.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
    max_file_size: usize,
) -> Result<MultipartFile, AppError> {
    let mut file: Option<MultipartFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_file_size, "Failed to read multipart"))?
    {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        if file.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let filename = field
            .file_name()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::InvalidInput("Uploaded file has no filename".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_file_size, "Failed to read file data"))?;

        file = Some(MultipartFile { filename, data });
    }

    file.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))
}

fn multipart_error(err: MultipartError, max_file_size: usize, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        // The real size is unknown once the limit trips
        return AppError::FileTooLarge {
            size: max_file_size.saturating_add(1),
            max: max_file_size,
        };
    }
    AppError::InvalidInput(format!("{}: {}", context, err.body_text()))
}
