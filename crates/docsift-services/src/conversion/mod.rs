//! Readiness-gated access to the conversion engine.

mod gateway;
mod slot;
mod startup;

pub use gateway::ConversionGateway;
pub use slot::ConverterSlot;
pub use startup::{spawn_engine_initialization, EngineStartup};
