use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Output format tag of a conversion response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConversionFormat {
    Markdown,
    Json,
}

/// Body returned by the conversion endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversionResponse {
    pub success: bool,
    /// Fresh identifier for this response; unrelated to the stored upload
    pub document_id: Uuid,
    pub format: ConversionFormat,
    /// `{"markdown": text}` for markdown, the structured document for json
    #[schema(value_type = Object)]
    pub content: serde_json::Value,
    /// Wall-clock seconds spent on intake and conversion
    pub processing_time: f64,
    pub page_count: usize,
}

impl ConversionResponse {
    pub fn markdown(markdown: String, page_count: usize, processing_time: f64) -> Self {
        Self {
            success: true,
            document_id: Uuid::new_v4(),
            format: ConversionFormat::Markdown,
            content: serde_json::json!({ "markdown": markdown }),
            processing_time,
            page_count,
        }
    }

    pub fn json(structured: serde_json::Value, page_count: usize, processing_time: f64) -> Self {
        Self {
            success: true,
            document_id: Uuid::new_v4(),
            format: ConversionFormat::Json,
            content: structured,
            processing_time,
            page_count,
        }
    }
}
