//! Docsift Infrastructure Library
//!
//! Shared infrastructure for the docsift service:
//! - Middleware (request ID)
//! - Telemetry initialization
//! - Upload cleanup (janitor)

#[cfg(feature = "middleware")]
pub mod middleware;

#[cfg(feature = "observability-basic")]
pub mod telemetry;

#[cfg(feature = "cleanup")]
pub mod cleanup;

// Re-export commonly used types
#[cfg(feature = "middleware")]
pub use middleware::{get_request_id, make_request_span, request_id_middleware, RequestId};

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, shutdown_telemetry};

#[cfg(feature = "cleanup")]
pub use cleanup::{Janitor, SweepReport};
