//! API data models
//!
//! Response bodies for every endpoint, organized by feature area.

mod conversion;
mod health;
mod invoice;

pub use conversion::*;
pub use health::*;
pub use invoice::*;
