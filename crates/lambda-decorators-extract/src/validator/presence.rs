//! Presence and emptiness checks.

use super::{Template, ValidationFailure, Validator};
use serde_json::Value;

/// Requires a value to be present, not `null` and not an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mandatory {
    message: Template,
}

impl Mandatory {
    const MESSAGE: &'static str = "Missing mandatory value";

    /// Creates the validator with the default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
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

impl Default for Mandatory {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for Mandatory {
    fn name(&self) -> &'static str {
        "mandatory"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        match value {
            Value::Null => self.check_absent(),
            Value::String(text) if text.is_empty() => {
                Err(self.message.fail(self.name(), Some(value), ""))
            }
            _ => Ok(()),
        }
    }

    fn check_absent(&self) -> Result<(), ValidationFailure> {
        Err(self.message.fail(self.name(), None, ""))
    }
}

/// Rejects empty strings, arrays and objects.
///
/// Zero and `false` are values, not emptiness, and pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmpty {
    message: Template,
}

impl NonEmpty {
    const MESSAGE: &'static str = "Value is empty";

    /// Creates the validator with the default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
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

impl Default for NonEmpty {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for NonEmpty {
    fn name(&self) -> &'static str {
        "non_empty"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        let empty = match value {
            Value::String(text) => text.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            Value::Null | Value::Bool(_) | Value::Number(_) => false,
        };
        if empty {
            Err(self.message.fail(self.name(), Some(value), ""))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mandatory() {
        let mandatory = Mandatory::new();
        assert!(mandatory.check(&json!("x")).is_ok());
        assert!(mandatory.check(&json!(0)).is_ok());
        assert!(mandatory.check(&json!(false)).is_ok());
        assert!(mandatory.check(&json!([])).is_ok());

        let failure = mandatory.check(&json!("")).unwrap_err();
        assert_eq!(failure.message(), "Missing mandatory value");
        assert!(mandatory.check(&Value::Null).is_err());
        assert!(mandatory.check_absent().is_err());
    }

    #[test]
    fn test_mandatory_custom_message() {
        let mandatory = Mandatory::new().with_message("id is required");
        assert_eq!(mandatory.check_absent().unwrap_err().message(), "id is required");
    }

    #[test]
    fn test_non_empty() {
        let non_empty = NonEmpty::new();
        for value in [json!(0), json!(0.0), json!(false), json!(null), json!("a"), json!([1])] {
            assert!(non_empty.check(&value).is_ok(), "{value} should pass");
        }
        for value in [json!(""), json!([]), json!({})] {
            let failure = non_empty.check(&value).unwrap_err();
            assert_eq!(failure.message(), "Value is empty");
        }
        assert!(non_empty.check_absent().is_ok());
    }
}
