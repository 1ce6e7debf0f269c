use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a configured level name onto a tracing level.
///
/// `WARNING` and `CRITICAL` are accepted alongside tracing's own names.
fn tracing_level(log_level: &str) -> &'static str {
    match log_level.trim().to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" | "critical" | "fatal" => "error",
        _ => "info",
    }
}

/// Filter directives used when `RUST_LOG` is not set
pub fn filter_directives(log_level: &str) -> String {
    let level = tracing_level(log_level);
    format!("docsift={level},tower_http={level}")
}

/// Initialize tracing with an env filter and a pretty or JSON fmt layer
pub fn init_telemetry(log_level: &str, log_format: &str) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;
    }

    tracing::debug!(log_level, log_format, "Tracing initialized");
    Ok(())
}

pub async fn shutdown_telemetry() {
    tracing::debug!("Telemetry shutdown");
}
