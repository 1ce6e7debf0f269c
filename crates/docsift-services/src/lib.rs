//! Docsift Services Layer
//!
//! Everything that talks to the document-conversion engine: the engine
//! contract, the Docling server client, and the readiness-gated gateway the
//! HTTP handlers convert through.

pub mod conversion;
pub mod engine;

pub use conversion::{spawn_engine_initialization, ConversionGateway, ConverterSlot, EngineStartup};
pub use engine::{
    ConversionEngine, ConvertedDocument, DoclingServeEngine, EngineError, EngineOptions,
};
