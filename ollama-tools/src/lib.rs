//! Shared plumbing for the `chat-once`, `ac-control` and `ats-checker` binaries.

pub mod cli;
pub mod config;
pub mod interrupt;
pub mod logging;

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";
