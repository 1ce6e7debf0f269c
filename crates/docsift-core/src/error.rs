//! Error types module
//!
//! Every failure a request can end in is one `AppError` variant. Lower crates
//! keep their own error enums and convert into `AppError` at the boundary.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like an engine that is still starting
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_FILE_TYPE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid file type '{extension}'. Allowed: {}", .allowed.join(", "))]
    InvalidFileType {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("File too large: {size} bytes exceeds maximum of {max} bytes")]
    FileTooLarge { size: usize, max: usize },

    #[error("Failed to save file: {0}")]
    StorageFailure(String),

    #[error("Service not ready")]
    ServiceNotReady,

    #[error("{0}")]
    ConversionFailed(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::StorageFailure(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// (status, code, recoverable, suggested_action, sensitive, log_level)
type StaticMetadata = (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
);

fn app_error_static_metadata(err: &AppError) -> StaticMetadata {
    match err {
        AppError::InvalidFileType { .. } => (
            400,
            "INVALID_FILE_TYPE",
            false,
            Some("Upload a file with one of the allowed extensions"),
            false,
            LogLevel::Debug,
        ),
        AppError::FileTooLarge { .. } => (
            400,
            "FILE_TOO_LARGE",
            false,
            Some("Reduce the file size or split the document"),
            false,
            LogLevel::Debug,
        ),
        AppError::StorageFailure(_) => (
            500,
            "STORAGE_FAILURE",
            true,
            Some("Retry the request later"),
            true,
            LogLevel::Error,
        ),
        AppError::ServiceNotReady => (
            503,
            "SERVICE_NOT_READY",
            true,
            Some("The conversion engine is starting; retry shortly"),
            false,
            LogLevel::Warn,
        ),
        AppError::ConversionFailed(_) => (
            500,
            "CONVERSION_FAILED",
            false,
            Some("Check that the document is a valid, unencrypted PDF"),
            false,
            LogLevel::Error,
        ),
        AppError::Unauthorized(_) => (
            401,
            "UNAUTHORIZED",
            false,
            Some("Provide a valid API key in the X-API-Key header"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Send the document as multipart/form-data in a field named 'file'"),
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            None,
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidFileType { .. } => "InvalidFileType",
            AppError::FileTooLarge { .. } => "FileTooLarge",
            AppError::StorageFailure(_) => "StorageFailure",
            AppError::ServiceNotReady => "ServiceNotReady",
            AppError::ConversionFailed(_) => "ConversionFailed",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidFileType { allowed, .. } => {
                format!("Invalid file type. Allowed: {}", allowed.join(", "))
            }
            AppError::FileTooLarge { max, .. } => {
                format!("File too large. Max size: {}MB", max / 1024 / 1024)
            }
            AppError::StorageFailure(_) => "Failed to save file".to_string(),
            AppError::ServiceNotReady => "Service not ready".to_string(),
            AppError::ConversionFailed(ref msg) => msg.clone(),
            AppError::Unauthorized(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                AppError::InvalidFileType {
                    extension: ".txt".into(),
                    allowed: vec![".pdf".into()],
                },
                400,
            ),
            (AppError::FileTooLarge { size: 2, max: 1 }, 400),
            (AppError::InvalidInput("x".into()), 400),
            (AppError::Unauthorized("x".into()), 401),
            (AppError::StorageFailure("x".into()), 500),
            (AppError::ConversionFailed("x".into()), 500),
            (AppError::Internal("x".into()), 500),
            (AppError::ServiceNotReady, 503),
        ];
        for (err, status) in cases {
            assert_eq!(err.http_status_code(), status, "{}", err.error_type());
        }
    }

    #[test]
    fn test_error_codes_are_distinct_for_intake_failures() {
        let invalid = AppError::InvalidFileType {
            extension: ".txt".into(),
            allowed: vec![".pdf".into()],
        };
        let too_large = AppError::FileTooLarge { size: 2, max: 1 };
        let storage = AppError::StorageFailure("disk full".into());
        assert_eq!(invalid.error_code(), "INVALID_FILE_TYPE");
        assert_eq!(too_large.error_code(), "FILE_TOO_LARGE");
        assert_eq!(storage.error_code(), "STORAGE_FAILURE");
    }

    #[test]
    fn test_client_messages() {
        let invalid = AppError::InvalidFileType {
            extension: ".txt".into(),
            allowed: vec![".pdf".into()],
        };
        assert_eq!(invalid.client_message(), "Invalid file type. Allowed: .pdf");

        let too_large = AppError::FileTooLarge {
            size: 60 * 1024 * 1024,
            max: 50 * 1024 * 1024,
        };
        assert_eq!(too_large.client_message(), "File too large. Max size: 50MB");

        let failed = AppError::ConversionFailed("corrupt xref table".into());
        assert_eq!(failed.client_message(), "corrupt xref table");
        assert_eq!(failed.to_string(), "corrupt xref table");
    }

    #[test]
    fn test_storage_failures_are_sensitive() {
        assert!(AppError::StorageFailure("/app/uploads: EACCES".into()).is_sensitive());
        assert!(!AppError::ConversionFailed("bad pdf".into()).is_sensitive());
    }

    #[test]
    fn test_io_error_maps_to_storage_failure() {
        let err: AppError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.error_code(), "STORAGE_FAILURE");
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let source = anyhow::anyhow!("root cause").context("outer");
        let err: AppError = source.into();
        assert!(err.detailed_message().contains("Caused by"));
    }
}
