//! Value validators.
//!
//! A [`Validator`] checks one value and reports a [`ValidationFailure`] with
//! a client-facing message. Messages are templates: `{value}` is replaced by
//! the checked value and `{condition}` by the validator's configuration.
//!
//! Only presence validators ([`Mandatory`]) reject an absent value or JSON
//! `null`; every other validator passes them.
//!
//! # Example
//!
//! ```rust
//! use lambda_decorators_extract::{Maximum, Validator};
//! use serde_json::json;
//!
//! let max = Maximum::new(10).with_message("{value} is too big, limit is {condition}");
//! assert!(max.check(&json!(7)).is_ok());
//!
//! let failure = max.check(&json!(12)).unwrap_err();
//! assert_eq!(failure.message(), "12 is too big, limit is 10");
//! assert!(max.check(&json!(null)).is_ok());
//! ```

mod numeric;
mod pattern;
mod presence;
mod schema;

pub use numeric::{MaxLength, Maximum, MinLength, Minimum};
pub use pattern::{CurrencyValidator, DateValidator, EnumValidator, RegexValidator};
pub use presence::{Mandatory, NonEmpty};
pub use schema::{SchemaValidator, TypeValidator, ValueKind};

use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// A validator rejected a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    validator: &'static str,
    message: String,
}

impl ValidationFailure {
    /// Creates a failure reported by `validator`.
    pub fn new(validator: &'static str, message: impl Into<String>) -> Self {
        Self {
            validator,
            message: message.into(),
        }
    }

    /// Returns the name of the validator that failed.
    #[must_use]
    pub fn validator(&self) -> &'static str {
        self.validator
    }

    /// Returns the rendered message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consumes the failure and returns the message.
    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}

/// Checks a single value.
pub trait Validator: Send + Sync + fmt::Debug {
    /// Short name used in logs and failures.
    fn name(&self) -> &'static str;

    /// Checks a present value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure`] if the value is rejected.
    fn check(&self, value: &Value) -> Result<(), ValidationFailure>;

    /// Checks the absence of a value. Passes unless this is a presence
    /// validator.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure`] if absence is rejected.
    fn check_absent(&self) -> Result<(), ValidationFailure> {
        Ok(())
    }
}

/// Message template shared by all validators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Template(Cow<'static, str>);

impl Template {
    pub(crate) const fn builtin(text: &'static str) -> Self {
        Self(Cow::Borrowed(text))
    }

    pub(crate) fn custom(text: impl Into<String>) -> Self {
        Self(Cow::Owned(text.into()))
    }

    /// Renders the template for `value` and `condition`.
    pub(crate) fn render(&self, value: Option<&Value>, condition: &str) -> String {
        let value = value.map_or_else(|| "None".to_string(), display_value);
        self.0
            .replace("{value}", &value)
            .replace("{condition}", condition)
    }

    pub(crate) fn fail(
        &self,
        validator: &'static str,
        value: Option<&Value>,
        condition: &str,
    ) -> ValidationFailure {
        ValidationFailure::new(validator, self.render(value, condition))
    }
}

/// Strings render bare; everything else as compact JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_template() {
        let template = Template::builtin("'{value}' is not '{condition}'");
        assert_eq!(template.render(Some(&json!("abc")), "x"), "'abc' is not 'x'");
        assert_eq!(template.render(Some(&json!([1, 2])), "x"), "'[1,2]' is not 'x'");
        assert_eq!(template.render(None, "x"), "'None' is not 'x'");
    }

    #[test]
    fn test_template_without_placeholders() {
        let template = Template::custom("Value is invalid");
        assert_eq!(template.render(Some(&json!(1)), "ignored"), "Value is invalid");
    }

    #[test]
    fn test_failure_accessors() {
        let failure = ValidationFailure::new("minimum", "too small");
        assert_eq!(failure.validator(), "minimum");
        assert_eq!(failure.to_string(), "too small");
        assert_eq!(failure.into_message(), "too small");
    }

    #[test]
    fn test_validators_as_trait_objects() {
        let validators: Vec<Box<dyn Validator>> = vec![
            Box::new(Mandatory::new()),
            Box::new(Minimum::new(1)),
            Box::new(RegexValidator::new("[a-z]+").unwrap()),
        ];
        let names: Vec<&str> = validators.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["mandatory", "minimum", "regex"]);

        let absent: Vec<bool> = validators.iter().map(|v| v.check_absent().is_ok()).collect();
        assert_eq!(absent, vec![false, true, true]);
    }
}
