use crate::error::{ErrorResponse, HttpAppError};
use crate::services::convert_upload;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};
use docsift_core::models::InvoiceExtractionResponse;
use docsift_processing::extract_invoice_fields;
use std::sync::Arc;

/// Convert an invoice and pull a few header fields out of its text.
///
/// Extraction is heuristic; fields it cannot find come back as `null`.
#[utoipa::path(
    post,
    path = "/extract/invoice",
    tag = "extraction",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Invoice fields extracted", body = InvoiceExtractionResponse),
        (status = 400, description = "Invalid file type, size or form", body = ErrorResponse),
        (status = 401, description = "Invalid or missing API key", body = ErrorResponse),
        (status = 500, description = "Conversion or storage failure", body = ErrorResponse),
        (status = 503, description = "Conversion engine not ready", body = ErrorResponse)
    )
)]
pub async fn extract_invoice(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<InvoiceExtractionResponse>, HttpAppError> {
    let converted = convert_upload(&state, multipart).await?;
    let invoice_data = extract_invoice_fields(converted.document.export_markdown());

    tracing::info!(
        filename = %converted.filename,
        invoice_number = ?invoice_data.invoice_number,
        processing_time = converted.elapsed.as_secs_f64(),
        "Invoice extraction completed"
    );

    Ok(Json(InvoiceExtractionResponse::new(invoice_data)))
}
