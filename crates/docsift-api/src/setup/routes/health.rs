//! Health check and service metadata handlers.

use crate::state::AppState;
use axum::{extract::State, Json};
use docsift_core::constants::{SERVICE_DESCRIPTION, SERVICE_NAME, SERVICE_VERSION};
use docsift_core::models::{HealthResponse, ServiceEndpoints, ServiceInfo};
use std::sync::Arc;

/// Liveness plus engine readiness. Always 200 while the process serves.
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::new(state.converter.is_ready().await))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses(
        (status = 200, description = "Service metadata and endpoint list", body = ServiceInfo)
    )
)]
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        description: SERVICE_DESCRIPTION.to_string(),
        endpoints: ServiceEndpoints {
            health: "/health".to_string(),
            convert_markdown: "/convert/markdown".to_string(),
            convert_json: "/convert/json".to_string(),
            extract_invoice: "/extract/invoice".to_string(),
            docs: "/docs".to_string(),
        },
    })
}
