//! Docsift API Library
//!
//! HTTP handlers, middleware and application setup for the document
//! conversion service.

// Module declarations
mod api_doc;
mod handlers;
mod services;
mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{hide_error_details, ErrorResponse, HttpAppError};
pub use state::AppState;
