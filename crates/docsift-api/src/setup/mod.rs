//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::{Context, Result};
use docsift_core::Config;
use docsift_services::{spawn_engine_initialization, ConverterSlot, EngineOptions, EngineStartup};
use std::sync::Arc;

/// Initialize the entire application
///
/// The conversion engine is brought up in the background; the returned
/// router serves `/health` right away and conversion endpoints answer 503
/// until the engine is ready.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    docsift_infra::init_telemetry(&config.base.log_level, &config.base.log_format)
        .context("Failed to initialize telemetry")?;

    tracing::info!(
        environment = %config.base.environment,
        "Configuration loaded and validated successfully"
    );

    let state = services::initialize_services(&config, ConverterSlot::new()).await?;

    spawn_engine_initialization(
        state.converter.clone(),
        EngineOptions::from(&config),
        EngineStartup::from(&config),
    );

    if state.janitor.clone().start().is_some() {
        tracing::info!(
            interval_secs = config.uploads.cleanup_interval_secs,
            retention_hours = config.uploads.keep_uploaded_files_hours,
            "Scheduled upload sweep started"
        );
    }

    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
