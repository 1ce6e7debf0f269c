use super::{ConversionGateway, ConverterSlot};
use crate::engine::{DoclingServeEngine, EngineError, EngineOptions};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Retry policy for bringing the engine up at startup
#[derive(Debug, Clone, Copy)]
pub struct EngineStartup {
    pub attempts: u32,
    pub initial_backoff: Duration,
    pub max_concurrent: usize,
}

impl From<&docsift_core::Config> for EngineStartup {
    fn from(config: &docsift_core::Config) -> Self {
        Self {
            attempts: config.engine.init_attempts,
            initial_backoff: Duration::from_millis(config.engine.init_backoff_ms),
            max_concurrent: config.engine.max_concurrent_conversions,
        }
    }
}

impl EngineStartup {
    /// Run `init` until it succeeds or attempts run out, doubling the delay between tries.
    pub async fn run<T, F, Fut>(&self, mut init: F) -> Result<T, EngineError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, EngineError>>,
    {
        let attempts = self.attempts.max(1);
        let mut backoff = self.initial_backoff;

        for attempt in 1..=attempts {
            match init().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt == attempts => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        attempt,
                        attempts,
                        retry_in_ms = backoff.as_millis() as u64,
                        "Conversion engine not ready, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                }
            }
        }

        Err(EngineError::Unavailable(
            "engine initialization was not attempted".to_string(),
        ))
    }
}

/// Initialize the Docling engine in the background and fill `slot` once it answers.
///
/// The server keeps serving `/health` meanwhile; conversion endpoints answer
/// 503 until the slot is filled, and keep doing so if every attempt fails.
pub fn spawn_engine_initialization(
    slot: ConverterSlot,
    options: EngineOptions,
    startup: EngineStartup,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(base_url = %options.base_url, "Initializing Docling conversion engine...");

        let result = startup
            .run(|| DoclingServeEngine::initialize(options.clone()))
            .await;

        match result {
            Ok(engine) => {
                slot.install(ConversionGateway::new(
                    Arc::new(engine),
                    startup.max_concurrent,
                ))
                .await;
                tracing::info!(
                    max_concurrent = startup.max_concurrent,
                    "Conversion engine initialized successfully"
                );
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    attempts = startup.attempts,
                    "Failed to initialize conversion engine; conversion endpoints will answer 503"
                );
            }
        }
    })
}
