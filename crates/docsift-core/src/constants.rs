//! Service identity and request-surface constants.

pub const SERVICE_NAME: &str = "Docling PDF Processing API";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SERVICE_DESCRIPTION: &str =
    "Process PDF invoices and documents through a Docling conversion engine";

/// Header carrying the shared secret on conversion endpoints.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Multipart field that carries the uploaded document.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Extra body allowance on top of the file ceiling for multipart framing.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;
