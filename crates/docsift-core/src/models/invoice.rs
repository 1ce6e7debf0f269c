use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Best-effort invoice fields pulled out of converted text.
///
/// Every field except `raw_text` is optional; an unmatched field serializes
/// as `null`, never as a zero or empty default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InvoiceData {
    pub invoice_number: Option<String>,
    pub date: Option<String>,
    pub vendor: Option<String>,
    pub total_amount: Option<f64>,
    #[schema(value_type = Vec<Object>)]
    pub line_items: Vec<serde_json::Value>,
    pub raw_text: String,
}

impl InvoiceData {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Default::default()
        }
    }
}

/// Body returned by the invoice extraction endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceExtractionResponse {
    pub success: bool,
    pub invoice_data: InvoiceData,
    /// Length of the converted text in characters
    pub document_text_length: usize,
}

impl InvoiceExtractionResponse {
    pub fn new(invoice_data: InvoiceData) -> Self {
        let document_text_length = invoice_data.raw_text.chars().count();
        Self {
            success: true,
            invoice_data,
            document_text_length,
        }
    }
}
