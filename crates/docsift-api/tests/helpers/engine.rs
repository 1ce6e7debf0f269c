//! In-process stand-in for the Docling server.

use async_trait::async_trait;
use docsift_services::{ConversionEngine, ConvertedDocument, EngineError};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub enum MockBehavior {
    Succeed {
        page_count: usize,
        markdown: String,
        structured: Value,
    },
    Fail(String),
}

/// What the engine observed for one `convert` call
#[derive(Debug, Clone)]
pub struct ConvertCall {
    pub path: PathBuf,
    /// Whether the upload was on disk when conversion started
    pub existed: bool,
    pub size: Option<u64>,
}

pub struct MockEngine {
    behavior: MockBehavior,
    calls: Mutex<Vec<ConvertCall>>,
}

impl MockEngine {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn returning_markdown(page_count: usize, markdown: &str) -> Self {
        Self::new(MockBehavior::Succeed {
            page_count,
            markdown: markdown.to_string(),
            structured: serde_json::json!({
                "schema_name": "DoclingDocument",
                "pages": {}
            }),
        })
    }

    pub fn failing(message: &str) -> Self {
        Self::new(MockBehavior::Fail(message.to_string()))
    }

    pub fn calls(&self) -> Vec<ConvertCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConversionEngine for MockEngine {
    async fn convert(&self, path: &Path) -> Result<ConvertedDocument, EngineError> {
        let metadata = std::fs::metadata(path).ok();
        self.calls.lock().unwrap().push(ConvertCall {
            path: path.to_path_buf(),
            existed: metadata.is_some(),
            size: metadata.map(|m| m.len()),
        });

        match &self.behavior {
            MockBehavior::Succeed {
                page_count,
                markdown,
                structured,
            } => Ok(ConvertedDocument::new(
                *page_count,
                markdown.clone(),
                structured.clone(),
            )),
            MockBehavior::Fail(message) => Err(EngineError::Failed(message.clone())),
        }
    }
}
