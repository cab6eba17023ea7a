//! Numeric bounds and length limits.

use super::{display_value, Template, ValidationFailure, Validator};
use serde_json::Value;

/// Requires a number greater than or equal to a bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    bound: f64,
    message: Template,
}

impl Minimum {
    const MESSAGE: &'static str = "'{value}' is less than minimum value '{condition}'";

    /// Creates the validator.
    pub fn new(bound: impl Into<f64>) -> Self {
        Self {
            bound: bound.into(),
            message: Template::builtin(Self::MESSAGE),
        }
    }

    /// Replaces the failure message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Template::custom(message);
        self
    }
}

impl Validator for Minimum {
    fn name(&self) -> &'static str {
        "minimum"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        check_bound(value, |n| n >= self.bound)
            .map_err(|()| self.message.fail(self.name(), Some(value), &self.bound.to_string()))
    }
}

/// Requires a number less than or equal to a bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Maximum {
    bound: f64,
    message: Template,
}

impl Maximum {
    const MESSAGE: &'static str = "'{value}' is greater than maximum value '{condition}'";

    /// Creates the validator.
    pub fn new(bound: impl Into<f64>) -> Self {
        Self {
            bound: bound.into(),
            message: Template::builtin(Self::MESSAGE),
        }
    }

    /// Replaces the failure message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Template::custom(message);
        self
    }
}

impl Validator for Maximum {
    fn name(&self) -> &'static str {
        "maximum"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        check_bound(value, |n| n <= self.bound)
            .map_err(|()| self.message.fail(self.name(), Some(value), &self.bound.to_string()))
    }
}

/// `null` passes; anything that is not a number fails.
fn check_bound(value: &Value, within: impl Fn(f64) -> bool) -> Result<(), ()> {
    match value {
        Value::Null => Ok(()),
        Value::Number(n) if n.as_f64().is_some_and(within) => Ok(()),
        _ => Err(()),
    }
}

/// Length of a value: characters of a string, items of an array or object,
/// characters of the rendered form otherwise.
fn length(value: &Value) -> usize {
    match value {
        Value::String(text) => text.chars().count(),
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        other => display_value(other).chars().count(),
    }
}

/// Requires a length of at least `min`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinLength {
    min: usize,
    message: Template,
}

impl MinLength {
    const MESSAGE: &'static str = "'{value}' is shorter than minimum length '{condition}'";

    /// Creates the validator.
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self {
            min,
            message: Template::builtin(Self::MESSAGE),
        }
    }

    /// Replaces the failure message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Template::custom(message);
        self
    }
}

impl Validator for MinLength {
    fn name(&self) -> &'static str {
        "min_length"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        if value.is_null() || length(value) >= self.min {
            Ok(())
        } else {
            Err(self.message.fail(self.name(), Some(value), &self.min.to_string()))
        }
    }
}

/// Requires a length of at most `max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxLength {
    max: usize,
    message: Template,
}

impl MaxLength {
    const MESSAGE: &'static str = "'{value}' is longer than maximum length '{condition}'";

    /// Creates the validator.
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self {
            max,
            message: Template::builtin(Self::MESSAGE),
        }
    }

    /// Replaces the failure message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Template::custom(message);
        self
    }
}

impl Validator for MaxLength {
    fn name(&self) -> &'static str {
        "max_length"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        if value.is_null() || length(value) <= self.max {
            Ok(())
        } else {
            Err(self.message.fail(self.name(), Some(value), &self.max.to_string()))
        }
    }
}
