//! Logging utilities.
//!
//! Centralizes logger initialization. Everything else logs through the `log`
//! facade; only the binary decides when the `env_logger` backend is installed.

mod init;

pub use init::{init_logging, LoggingConfig};
