use crate::engine::{ConversionEngine, ConvertedDocument, EngineError};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// The single shared engine handle plus a bound on in-flight conversions.
///
/// Requests over the bound wait for a permit; none are rejected.
#[derive(Clone)]
pub struct ConversionGateway {
    engine: Arc<dyn ConversionEngine>,
    permits: Arc<Semaphore>,
    max_concurrent: usize,
}

impl ConversionGateway {
    pub fn new(engine: Arc<dyn ConversionEngine>, max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            engine,
            permits: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Permits not currently held by a conversion
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    #[tracing::instrument(skip(self, path), fields(file_path = %path.display()))]
    pub async fn convert(&self, path: &Path) -> Result<ConvertedDocument, EngineError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| EngineError::Unavailable("conversion gateway closed".to_string()))?;

        let start = Instant::now();
        tracing::info!("Converting document");

        let result = self.engine.convert(path).await;
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        match &result {
            Ok(document) => tracing::info!(
                page_count = document.page_count(),
                duration_ms,
                "Conversion successful"
            ),
            Err(e) => tracing::error!(error = %e, duration_ms, "Conversion error"),
        }

        result
    }
}
