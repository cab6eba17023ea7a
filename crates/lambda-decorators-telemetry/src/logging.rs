//! Structured logging for decorated handlers.
//!
//! Handlers running in a function runtime write their logs to stdout, where
//! the platform collects them. JSON output is the default so log lines can be
//! queried by field (`source`, `path`, `field`, `error_code`).
//!
//! # Example
//!
//! ```rust,no_run
//! use lambda_decorators_telemetry::{init_logging, LogConfig};
//!
//! # fn main() -> Result<(), lambda_decorators_telemetry::TelemetryError> {
//! init_logging(&LogConfig::from_env())?;
//! tracing::info!(function = "create_payment", "handler started");
//! # Ok(())
//! # }
//! ```

use crate::error::TelemetryError;
use crate::TelemetryResult;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Environment variable that overrides the log level.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether logging is enabled.
    pub enabled: bool,

    /// Log level or filter directive (e.g. "info", "lambda_decorators=debug").
    pub level: String,

    /// Whether to output JSON format.
    pub json_format: bool,

    /// Whether to include span events (new, close).
    pub span_events: bool,

    /// Whether to include file/line info.
    pub file_line_info: bool,

    /// Whether to include target (module path).
    pub include_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            json_format: true,
            span_events: false,
            file_line_info: false,
            include_target: true,
        }
    }
}

impl LogConfig {
    /// Creates a development configuration with human-readable output.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            span_events: true,
            file_line_info: true,
            ..Self::default()
        }
    }

    /// Default configuration with the level taken from `LOG_LEVEL`, if set.
    #[must_use]
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(LOG_LEVEL_ENV) {
            Ok(level) if !level.trim().is_empty() => config.with_level(level.trim()),
            _ => config,
        }
    }

    /// Sets the level. Plain level names are lowercased.
    #[must_use]
    pub fn with_level(mut self, level: &str) -> Self {
        let lowered = level.to_ascii_lowercase();
        self.level = if VALID_LEVELS.contains(&lowered.as_str()) {
            lowered
        } else {
            level.to_string()
        };
        self
    }

    /// Checks that the level parses as a filter.
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::InvalidConfig` for an unparseable level.
    pub fn validate(&self) -> TelemetryResult<()> {
        create_env_filter(&self.level)
            .map(drop)
            .map_err(|_| TelemetryError::InvalidConfig(format!("invalid log level: {}", self.level)))
    }
}

/// Initializes the global logging subscriber.
///
/// # Errors
///
/// Returns `TelemetryError::LoggingInit` if the level is invalid or a global
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;

    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    if config.json_format {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_span_events(span_events)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_target(config.include_target)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_target(config.include_target)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    }

    Ok(())
}

/// Creates an env filter from a string.
///
/// # Errors
///
/// Returns error if the filter string is invalid.
pub fn create_env_filter(filter: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(filter).map_err(|e| TelemetryError::LoggingInit(format!("Invalid log level: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert!(config.enabled);
        assert!(config.json_format);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_development_config() {
        let config = LogConfig::development();
        assert!(!config.json_format);
        assert!(config.span_events);
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_with_level_normalizes_names() {
        assert_eq!(LogConfig::default().with_level("DEBUG").level, "debug");
        assert_eq!(
            LogConfig::default().with_level("lambda_decorators=trace").level,
            "lambda_decorators=trace"
        );
    }

    #[test]
    fn test_validate() {
        assert!(LogConfig::default().validate().is_ok());
        let bad = LogConfig::default().with_level("lambda_decorators=verbose");
        assert!(matches!(bad.validate(), Err(TelemetryError::InvalidConfig(_))));
    }

    #[test]
    fn test_disabled_logging() {
        let config = LogConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(init_logging(&config).is_ok());
    }
}
