//! Docsift Core Library
//!
//! This crate provides the configuration, error taxonomy and API models
//! shared by every docsift component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, EngineConfig, UploadConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
