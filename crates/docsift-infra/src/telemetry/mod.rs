//! Tracing initialization
//!
//! Installs the global subscriber. `RUST_LOG` wins when set; otherwise the
//! filter is derived from the configured log level.

mod init_basic;

pub use init_basic::{filter_directives, init_telemetry, shutdown_telemetry};
