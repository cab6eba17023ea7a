//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! multiple sources: defaults, files, and environment variables.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use lambda_decorators_telemetry::LOG_LEVEL_ENV;

use crate::{ConfigError, DecoratorsConfig, LogFormat};

/// Configuration loader with layered approach.
///
/// Later layers override earlier ones:
/// 1. Default values
/// 2. Configuration file (TOML or JSON)
/// 3. `LOG_LEVEL`
/// 4. Environment variables with a prefix
///
/// # Example
///
/// ```no_run
/// use lambda_decorators_config::ConfigLoader;
///
/// # fn main() -> Result<(), lambda_decorators_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_optional_file("decorators.toml")?
///     .with_env_prefix("DECORATORS")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: DecoratorsConfig,
    env_prefix: Option<String>,
    read_log_level: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader starting from defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: DecoratorsConfig::default(),
            env_prefix: None,
            read_log_level: true,
        }
    }

    /// Load configuration from a file.
    ///
    /// The format is chosen by extension: `.toml` or `.json`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, unreadable, malformed, or
    /// contains unknown fields.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        self.config = match extension.as_deref() {
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        Ok(self)
    }

    /// Load configuration from a file if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be loaded.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string in the given format ("toml" or "json").
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing fails.
    ///
    /// # Example
    ///
    /// ```
    /// use lambda_decorators_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [cors]
    ///     allow_origin = "*"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .ignore_log_level_env()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.cors.allow_origin.as_deref(), Some("*"));
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => return Err(ConfigError::UnsupportedFormat(format.to_string())),
        };
        Ok(self)
    }

    /// Set environment variable prefix for overrides.
    ///
    /// Variables use the format `PREFIX__SECTION__KEY`, for example
    /// `DECORATORS__CORS__ALLOW_ORIGIN=*`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Do not apply `LOG_LEVEL` on load.
    #[must_use]
    pub fn ignore_log_level_env(mut self) -> Self {
        self.read_log_level = false;
        self
    }

    /// Load a `.env` file into the process environment, if one exists.
    #[must_use]
    pub fn with_dotenv(self) -> Self {
        // A missing .env file is not an error
        let _ = dotenvy::dotenv();
        self
    }

    /// Finalize and return the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an environment variable does not parse or the
    /// final configuration is invalid.
    pub fn load(mut self) -> Result<DecoratorsConfig, ConfigError> {
        if self.read_log_level {
            if let Ok(level) = env::var(LOG_LEVEL_ENV) {
                if !level.trim().is_empty() {
                    self.config.logging.level = level.trim().to_string();
                }
            }
        }

        if let Some(prefix) = self.env_prefix.take() {
            let vars: HashMap<String, String> =
                env::vars().filter(|(k, _)| k.starts_with(&prefix)).collect();
            for (key, value) in vars {
                self.apply_env_var(&key, &value, &prefix)?;
            }
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Finalize without validation or environment overrides.
    #[must_use]
    pub fn load_unvalidated(self) -> DecoratorsConfig {
        self.config
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let Some(rest) = key.strip_prefix(prefix).and_then(|k| k.strip_prefix("__")) else {
            // Shares the prefix but not the separator, e.g. DECORATORSX
            return Ok(());
        };

        let parts: Vec<&str> = rest.split("__").collect();
        let optional = || (!value.is_empty()).then(|| value.to_string());

        match parts.as_slice() {
            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => {
                self.config.logging.level = value.to_string();
            }
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'json' or 'pretty'",
                        ))
                    }
                };
            }
            ["LOGGING", "INCLUDE_LOCATION"] => {
                self.config.logging.include_location = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }

            ["CORS", "ALLOW_ORIGIN"] => self.config.cors.allow_origin = optional(),
            ["CORS", "ALLOW_METHODS"] => self.config.cors.allow_methods = optional(),
            ["CORS", "ALLOW_HEADERS"] => self.config.cors.allow_headers = optional(),
            ["CORS", "MAX_AGE"] => {
                self.config.cors.max_age = if value.is_empty() {
                    None
                } else {
                    Some(
                        value
                            .parse()
                            .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))?,
                    )
                };
            }

            ["MESSAGES", "EXTRACT_FAILURE"] => {
                self.config.messages.extract_failure = value.to_string();
            }
            ["MESSAGES", "NON_JSON_BODY"] => {
                self.config.messages.non_json_body = value.to_string();
            }

            _ => {}
        }

        Ok(())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader() -> ConfigLoader {
        ConfigLoader::new().ignore_log_level_env()
    }

    #[test]
    fn test_loader_defaults() {
        let config = loader().load().unwrap();
        assert_eq!(config, DecoratorsConfig::default());
    }

    #[test]
    fn test_loader_with_string_json() {
        let json = r#"{"cors": {"allow_origin": "https://example.com", "max_age": 600}}"#;
        let config = loader().with_string(json, "json").unwrap().load().unwrap();
        assert_eq!(config.cors.allow_origin.as_deref(), Some("https://example.com"));
        assert_eq!(config.cors.max_age, Some(600));
    }

    #[test]
    fn test_loader_unsupported_format() {
        let err = loader().with_string("a: b", "yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_loader_with_file_not_found() {
        let result = loader().with_file("/nonexistent/decorators.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_loader_with_optional_file_not_found() {
        let config = loader()
            .with_optional_file("/nonexistent/decorators.toml")
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("on"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_apply_env_var_cors() {
        let mut loader = loader();
        loader.apply_env_var("TEST__CORS__ALLOW_ORIGIN", "*", "TEST").unwrap();
        loader.apply_env_var("TEST__CORS__MAX_AGE", "300", "TEST").unwrap();
        assert_eq!(loader.config.cors.allow_origin.as_deref(), Some("*"));
        assert_eq!(loader.config.cors.max_age, Some(300));

        loader.apply_env_var("TEST__CORS__ALLOW_ORIGIN", "", "TEST").unwrap();
        assert_eq!(loader.config.cors.allow_origin, None);
    }

    #[test]
    fn test_apply_env_var_logging() {
        let mut loader = loader();
        loader.apply_env_var("TEST__LOGGING__FORMAT", "pretty", "TEST").unwrap();
        loader.apply_env_var("TEST__LOGGING__LEVEL", "debug", "TEST").unwrap();
        assert_eq!(loader.config.logging.format, LogFormat::Pretty);
        assert_eq!(loader.config.logging.level, "debug");
    }

    #[test]
    fn test_apply_env_var_invalid_integer() {
        let mut loader = loader();
        let result = loader.apply_env_var("TEST__CORS__MAX_AGE", "ten", "TEST");
        assert!(matches!(result, Err(ConfigError::EnvParseError { .. })));
    }

    #[test]
    fn test_apply_env_var_unknown_key_ignored() {
        let mut loader = loader();
        loader.apply_env_var("TEST__NOPE", "x", "TEST").unwrap();
        loader.apply_env_var("TESTING__CORS__ALLOW_ORIGIN", "*", "TEST").unwrap();
        assert_eq!(loader.config, DecoratorsConfig::default());
    }
}
