//! Conversion engine contract
//!
//! The engine is an opaque collaborator: hand it a local file, get back a
//! page count plus markdown and structured exports. Parsing, OCR and table
//! recognition all happen on the other side of this trait.

mod docling;

pub use docling::DoclingServeEngine;

use async_trait::async_trait;
use docsift_core::AppError;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Conversion engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Conversion engine unavailable: {0}")]
    Unavailable(String),

    #[error("Conversion engine returned {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("{0}")]
    Failed(String),

    #[error("Conversion engine request failed: {0}")]
    Transport(String),

    #[error("Invalid conversion engine response: {0}")]
    InvalidResponse(String),

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError::ConversionFailed(err.to_string())
    }
}

/// Options the engine handle is initialized with
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub base_url: String,
    pub ocr: bool,
    pub table_structure: bool,
    /// Upper bound on a single conversion round-trip
    pub timeout: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
            ocr: true,
            table_structure: true,
            timeout: Duration::from_secs(300),
        }
    }
}

impl From<&docsift_core::Config> for EngineOptions {
    fn from(config: &docsift_core::Config) -> Self {
        Self {
            base_url: config.engine.docling_serve_url.clone(),
            ocr: config.engine.do_ocr,
            table_structure: config.engine.do_table_structure,
            timeout: config.conversion_timeout(),
        }
    }
}

/// A converted document, held in memory for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedDocument {
    page_count: usize,
    markdown: String,
    structured: serde_json::Value,
}

impl ConvertedDocument {
    pub fn new(page_count: usize, markdown: String, structured: serde_json::Value) -> Self {
        Self {
            page_count,
            markdown,
            structured,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn export_markdown(&self) -> &str {
        &self.markdown
    }

    pub fn export_structured(&self) -> &serde_json::Value {
        &self.structured
    }

    pub fn into_markdown(self) -> String {
        self.markdown
    }

    pub fn into_structured(self) -> serde_json::Value {
        self.structured
    }
}

#[async_trait]
pub trait ConversionEngine: Send + Sync {
    /// Convert the document at `path`. The file must stay in place until this returns.
    async fn convert(&self, path: &Path) -> Result<ConvertedDocument, EngineError>;
}
