use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy" while the process is serving requests
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// Whether the conversion engine handle is initialized
    pub converter_ready: bool,
}

impl HealthResponse {
    pub fn new(converter_ready: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
            converter_ready,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceEndpoints {
    pub health: String,
    pub convert_markdown: String,
    pub convert_json: String,
    pub extract_invoice: String,
    pub docs: String,
}

/// Service metadata returned by `GET /`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub description: String,
    pub endpoints: ServiceEndpoints,
}
