use crate::error::{ErrorResponse, HttpAppError};
use crate::services::convert_upload;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};
use docsift_core::models::ConversionResponse;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/convert/markdown",
    tag = "conversion",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "PDF converted to Markdown", body = ConversionResponse),
        (status = 400, description = "Invalid file type, size or form", body = ErrorResponse),
        (status = 401, description = "Invalid or missing API key", body = ErrorResponse),
        (status = 500, description = "Conversion or storage failure", body = ErrorResponse),
        (status = 503, description = "Conversion engine not ready", body = ErrorResponse)
    )
)]
pub async fn convert_markdown(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ConversionResponse>, HttpAppError> {
    let converted = convert_upload(&state, multipart).await?;
    let page_count = converted.document.page_count();

    tracing::info!(
        filename = %converted.filename,
        page_count,
        processing_time = converted.elapsed.as_secs_f64(),
        "Converted to markdown"
    );

    Ok(Json(ConversionResponse::markdown(
        converted.document.into_markdown(),
        page_count,
        converted.elapsed.as_secs_f64(),
    )))
}

#[utoipa::path(
    post,
    path = "/convert/json",
    tag = "conversion",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "PDF converted to a structured document", body = ConversionResponse),
        (status = 400, description = "Invalid file type, size or form", body = ErrorResponse),
        (status = 401, description = "Invalid or missing API key", body = ErrorResponse),
        (status = 500, description = "Conversion or storage failure", body = ErrorResponse),
        (status = 503, description = "Conversion engine not ready", body = ErrorResponse)
    )
)]
pub async fn convert_json(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ConversionResponse>, HttpAppError> {
    let converted = convert_upload(&state, multipart).await?;
    let page_count = converted.document.page_count();

    tracing::info!(
        filename = %converted.filename,
        page_count,
        processing_time = converted.elapsed.as_secs_f64(),
        "Converted to structured document"
    );

    Ok(Json(ConversionResponse::json(
        converted.document.into_structured(),
        page_count,
        converted.elapsed.as_secs_f64(),
    )))
}
