//! OpenAPI documentation, served at `/api/openapi.json` and browsable at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::setup::routes::health;
use docsift_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Docling PDF Processing API",
        description = "Convert PDF documents to Markdown or a structured JSON document using a Docling server, and extract basic invoice fields. When API_KEY is configured, conversion endpoints require it in the X-API-Key header."
    ),
    paths(
        // Service
        health::service_info,
        health::health_check,
        // Conversion
        handlers::convert::convert_markdown,
        handlers::convert::convert_json,
        // Extraction
        handlers::invoice::extract_invoice,
    ),
    components(
        schemas(
            models::ConversionFormat,
            models::ConversionResponse,
            models::InvoiceData,
            models::InvoiceExtractionResponse,
            models::HealthResponse,
            models::ServiceEndpoints,
            models::ServiceInfo,
            // Error
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "service", description = "Service metadata and health checks"),
        (name = "conversion", description = "PDF to Markdown and structured document conversion"),
        (name = "extraction", description = "Heuristic field extraction from converted documents")
    )
)]
pub struct ApiDoc;
