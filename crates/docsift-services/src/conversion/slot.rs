use super::ConversionGateway;
use docsift_core::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-wide "converter ready" holder.
///
/// Empty until the startup task installs a gateway, and emptied again at
/// shutdown. Clones share the same slot.
#[derive(Clone, Default)]
pub struct ConverterSlot {
    inner: Arc<RwLock<Option<ConversionGateway>>>,
}

impl ConverterSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that is ready from the start
    pub fn with_gateway(gateway: ConversionGateway) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(gateway))),
        }
    }

    pub async fn install(&self, gateway: ConversionGateway) {
        *self.inner.write().await = Some(gateway);
    }

    /// Empty the slot. Returns whether a gateway was installed.
    pub async fn clear(&self) -> bool {
        self.inner.write().await.take().is_some()
    }

    pub async fn is_ready(&self) -> bool {
        self.inner.read().await.is_some()
    }

    /// The installed gateway, or `ServiceNotReady` while the slot is empty.
    pub async fn acquire(&self) -> Result<ConversionGateway, AppError> {
        self.inner
            .read()
            .await
            .clone()
            .ok_or(AppError::ServiceNotReady)
    }
}
