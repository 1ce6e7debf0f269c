use docsift_core::Config;
use docsift_infra::Janitor;
use docsift_processing::UploadValidator;
use docsift_services::ConverterSlot;
use docsift_storage::UploadStorage;
use std::sync::Arc;

/// Shared state handed to every handler.
///
/// The converter slot starts empty and is filled by the background
/// initializer once the engine answers; handlers report 503 until then.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub converter: ConverterSlot,
    pub validator: UploadValidator,
    pub storage: Arc<dyn UploadStorage>,
    pub janitor: Arc<Janitor>,
}
