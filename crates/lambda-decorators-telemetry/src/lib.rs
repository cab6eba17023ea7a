//! Logging setup for lambda-decorators.
//!
//! Decorators emit `tracing` events; this crate installs the subscriber that
//! formats them. Call [`init_logging`] once per process, before the first
//! invocation is handled.
//!
//! The level defaults to `info` and can be overridden with the `LOG_LEVEL`
//! environment variable.

#![doc(html_root_url = "https://docs.rs/lambda-decorators-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig, LOG_LEVEL_ENV};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
