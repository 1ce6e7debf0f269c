//! Upload cleanup
//!
//! Per-request release of uploads plus a time-based sweep of the upload and
//! temp directories.

mod janitor;

pub use janitor::{Janitor, SweepReport};
