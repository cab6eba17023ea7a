//! Configuration types.
//!
//! [`DecoratorsConfig`] is the root; each section has working defaults so an
//! empty file is a valid configuration.

use lambda_decorators_telemetry::LogConfig;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Message returned when a required source argument is missing.
pub const DEFAULT_EXTRACT_FAILURE_MESSAGE: &str = "Error extracting parameters";

/// Message returned when a response body cannot be serialized.
pub const DEFAULT_NON_JSON_BODY_MESSAGE: &str = "Response body is not JSON serializable";

/// Complete decorator configuration.
///
/// # Example
///
/// ```
/// use lambda_decorators_config::DecoratorsConfig;
///
/// let config = DecoratorsConfig::default();
/// assert_eq!(config.logging.level, "info");
/// assert!(config.cors.allow_origin.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct DecoratorsConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSection,

    /// CORS header defaults.
    #[serde(default)]
    pub cors: CorsSection,

    /// Texts used in failure responses.
    #[serde(default)]
    pub messages: MessagesSection,
}

impl DecoratorsConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the log level does not parse or
    /// a CORS value is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logging
            .to_log_config()
            .validate()
            .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;

        let cors = [
            ("cors.allow_origin", &self.cors.allow_origin),
            ("cors.allow_methods", &self.cors.allow_methods),
            ("cors.allow_headers", &self.cors.allow_headers),
        ];
        for (field, value) in cors {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::invalid_value(field, "must not be blank"));
            }
        }

        Ok(())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level (trace, debug, info, warn, error) or a filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

impl LoggingSection {
    /// Converts to the subscriber settings.
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            json_format: self.format == LogFormat::Json,
            file_line_info: self.include_location,
            ..LogConfig::default()
        }
        .with_level(&self.level)
    }
}

/// Default CORS header values. `None` leaves the header unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct CorsSection {
    /// Value for `access-control-allow-origin`.
    #[serde(default)]
    pub allow_origin: Option<String>,

    /// Value for `access-control-allow-methods`.
    #[serde(default)]
    pub allow_methods: Option<String>,

    /// Value for `access-control-allow-headers`.
    #[serde(default)]
    pub allow_headers: Option<String>,

    /// Value for `access-control-max-age`, in seconds.
    #[serde(default)]
    pub max_age: Option<u64>,
}

/// Failure response texts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MessagesSection {
    /// Returned when a source argument is missing.
    #[serde(default = "default_extract_failure")]
    pub extract_failure: String,

    /// Returned when a response body cannot be serialized.
    #[serde(default = "default_non_json_body")]
    pub non_json_body: String,
}

impl Default for MessagesSection {
    fn default() -> Self {
        Self {
            extract_failure: default_extract_failure(),
            non_json_body: default_non_json_body(),
        }
    }
}

const fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_extract_failure() -> String {
    DEFAULT_EXTRACT_FAILURE_MESSAGE.to_string()
}

fn default_non_json_body() -> String {
    DEFAULT_NON_JSON_BODY_MESSAGE.to_string()
}
