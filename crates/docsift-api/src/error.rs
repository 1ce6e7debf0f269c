//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Domain
//! errors from the lower crates convert into `HttpAppError` with `?` so every
//! failure renders the same JSON shape with the mapped status.
//!
//! Production mode is a router concern: `setup_routes` installs
//! [`hide_error_details`] when the configured environment is production.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use docsift_core::{AppError, ErrorMetadata, LogLevel};
use docsift_processing::ValidationError;
use docsift_services::EngineError;
use docsift_storage::StorageError;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorResponse {
    /// Drop the fields that describe internals, keeping the client message.
    pub fn without_details(mut self) -> Self {
        self.details = None;
        self.error_type = None;
        self
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: IntoResponse and AppError both live in other crates)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

impl HttpAppError {
    fn to_body(&self) -> ErrorResponse {
        let app_error = &self.0;
        let hide_details = app_error.is_sensitive();

        ErrorResponse {
            error: app_error.client_message(),
            details: (!hide_details).then(|| app_error.detailed_message()),
            error_type: (!hide_details).then(|| app_error.error_type().to_string()),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.0);

        let body = self.to_body();
        let mut response = (status, Json(&body)).into_response();
        // Kept so outer middleware can re-render the body
        response.extensions_mut().insert(body);
        response
    }
}

/// Re-render error bodies without `details` and `error_type`.
pub async fn hide_error_details(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let Some(body) = response.extensions_mut().remove::<ErrorResponse>() else {
        return response;
    };

    let (parts, _) = response.into_parts();
    let redacted = Json(body.without_details()).into_response().into_body();
    Response::from_parts(parts, redacted)
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::UploadFailed(msg) => AppError::StorageFailure(msg),
            StorageError::DeleteFailed(msg) => AppError::StorageFailure(msg),
            StorageError::IoError(err) => AppError::StorageFailure(err.to_string()),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<EngineError> for HttpAppError {
    fn from(err: EngineError) -> Self {
        HttpAppError(err.into())
    }
}
