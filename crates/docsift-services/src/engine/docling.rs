use super::{ConversionEngine, ConvertedDocument, EngineError, EngineOptions};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::{Duration, Instant};

const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for an out-of-process Docling server (`docling-serve`).
///
/// One handle is shared by every request; `reqwest::Client` pools
/// connections internally and is safe to use concurrently.
#[derive(Clone)]
pub struct DoclingServeEngine {
    client: Client,
    options: EngineOptions,
}

impl std::fmt::Debug for DoclingServeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoclingServeEngine")
            .field("base_url", &self.options.base_url)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ConvertDocumentResponse {
    #[serde(default)]
    document: Option<ExportDocument>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ExportDocument {
    #[serde(default)]
    md_content: Option<String>,
    #[serde(default)]
    json_content: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorItem {
    #[serde(default)]
    error_message: String,
}

impl DoclingServeEngine {
    /// Build the handle and confirm the server answers its health probe.
    pub async fn initialize(options: EngineOptions) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| EngineError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        let engine = Self {
            client,
            options: EngineOptions {
                base_url: options.base_url.trim_end_matches('/').to_string(),
                ..options
            },
        };
        engine.health_check().await?;

        tracing::info!(
            base_url = %engine.options.base_url,
            ocr = engine.options.ocr,
            table_structure = engine.options.table_structure,
            "Docling server reachable"
        );

        Ok(engine)
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.options.base_url, path)
    }

    pub async fn health_check(&self) -> Result<(), EngineError> {
        let response = self
            .client
            .get(self.build_url("/health"))
            .timeout(HEALTH_PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|e| EngineError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Unavailable(format!(
                "health probe returned {}",
                status
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl ConversionEngine for DoclingServeEngine {
    async fn convert(&self, path: &Path) -> Result<ConvertedDocument, EngineError> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document.pdf")
            .to_string();
        let size = data.len();
        let start = Instant::now();

        let form = Form::new()
            .part("files", Part::bytes(data).file_name(file_name))
            .text("to_formats", "md")
            .text("to_formats", "json")
            .text("do_ocr", self.options.ocr.to_string())
            .text("do_table_structure", self.options.table_structure.to_string());

        let response = self
            .client
            .post(self.build_url("/v1/convert/file"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| EngineError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(EngineError::Rejected {
                status: status.as_u16(),
                message: error_detail(&error_text),
            });
        }

        let body: ConvertDocumentResponse = response
            .json()
            .await
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))?;

        let document = map_response(body)?;

        tracing::debug!(
            size_bytes = size,
            page_count = document.page_count(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Docling conversion round-trip complete"
        );

        Ok(document)
    }
}

fn map_response(body: ConvertDocumentResponse) -> Result<ConvertedDocument, EngineError> {
    if body.status.as_deref() == Some("failure") {
        let messages: Vec<&str> = body
            .errors
            .iter()
            .map(|e| e.error_message.as_str())
            .filter(|m| !m.is_empty())
            .collect();
        let message = if messages.is_empty() {
            "Document conversion failed".to_string()
        } else {
            messages.join("; ")
        };
        return Err(EngineError::Failed(message));
    }

    let document = body
        .document
        .ok_or_else(|| EngineError::InvalidResponse("response has no document".to_string()))?;

    let structured = match document.json_content {
        Some(serde_json::Value::Null) | None => serde_json::json!({}),
        Some(value) => value,
    };

    Ok(ConvertedDocument::new(
        page_count(&structured),
        document.md_content.unwrap_or_default(),
        structured,
    ))
}

/// Docling documents key pages by number; older exports use a list.
fn page_count(structured: &serde_json::Value) -> usize {
    match structured.get("pages") {
        Some(serde_json::Value::Object(pages)) => pages.len(),
        Some(serde_json::Value::Array(pages)) => pages.len(),
        _ => 0,
    }
}

/// Prefer the `detail` field of a JSON error body over the raw text.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| match v.get("detail") {
            Some(serde_json::Value::String(detail)) => Some(detail.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        })
        .unwrap_or_else(|| body.to_string())
}
