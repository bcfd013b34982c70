//! Logging utilities.
//!
//! Centralizes logger initialization on the `log` facade with an
//! `env_logger` backend; engine code logs through `log::` macros only.

mod init;

pub use init::{LoggingConfig, init_logging};
