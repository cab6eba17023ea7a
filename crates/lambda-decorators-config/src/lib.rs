//! Typed configuration for lambda-decorators.
//!
//! This crate provides:
//! - [`DecoratorsConfig`], the settings shared by decorators (logging, CORS
//!   defaults, failure messages)
//! - [`ConfigLoader`], layering defaults, a TOML or JSON file and environment
//!   variables, with unknown fields rejected
//! - [`ParameterStore`], the batch lookup behind parameter-store injection
//!
//! # Example
//!
//! ```no_run
//! use lambda_decorators_config::ConfigLoader;
//!
//! # fn main() -> Result<(), lambda_decorators_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()
//!     .with_optional_file("decorators.toml")?
//!     .with_env_prefix("DECORATORS")
//!     .load()?;
//!
//! lambda_decorators_telemetry::init_logging(&config.logging.to_log_config()).ok();
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [cors]
//! allow_origin = "*"
//! allow_methods = "GET,POST"
//! max_age = 600
//!
//! [messages]
//! extract_failure = "Error extracting parameters"
//! ```

#![doc(html_root_url = "https://docs.rs/lambda-decorators-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod store;

pub use config::{
    CorsSection, DecoratorsConfig, LogFormat, LoggingSection, MessagesSection,
    DEFAULT_EXTRACT_FAILURE_MESSAGE, DEFAULT_NON_JSON_BODY_MESSAGE,
};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use store::{
    EnvParameterStore, InMemoryParameterStore, ParameterStore, StoreError, StoredParameter,
};
