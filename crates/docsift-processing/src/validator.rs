use docsift_core::AppError;
use std::path::Path;

/// Upload validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Filename has no extension: {filename} (allowed: {allowed:?})")]
    MissingExtension {
        filename: String,
        allowed: Vec<String>,
    },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::FileTooLarge { size, max } => AppError::FileTooLarge { size, max },
            ValidationError::InvalidExtension { extension, allowed } => {
                AppError::InvalidFileType { extension, allowed }
            }
            ValidationError::MissingExtension { allowed, .. } => AppError::InvalidFileType {
                extension: String::new(),
                allowed,
            },
        }
    }
}

/// Upload validator
///
/// Checks the claimed filename against the extension allow-list and the
/// payload against the size ceiling. Runs before anything touches disk.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
}

impl UploadValidator {
    /// `allowed_extensions` are lower-case with a leading dot (".pdf").
    pub fn new(max_file_size: usize, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Validate file size. Empty uploads pass; the engine decides what to do with them.
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate the extension of `filename` and return it lower-cased with its dot.
    pub fn validate_extension(&self, filename: &str) -> Result<String, ValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .ok_or_else(|| ValidationError::MissingExtension {
                filename: filename.to_string(),
                allowed: self.allowed_extensions.clone(),
            })?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(extension)
    }

    /// Extension first, then size. Returns the normalized extension.
    pub fn validate(&self, filename: &str, size: usize) -> Result<String, ValidationError> {
        let extension = self.validate_extension(filename)?;
        self.validate_file_size(size)?;
        Ok(extension)
    }
}
