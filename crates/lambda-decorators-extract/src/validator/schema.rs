//! Structural validators: JSON Schema conformance and JSON type checks.

use super::{Template, ValidationFailure, Validator};
use crate::error::DeclarationError;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Requires a value to conform to a JSON Schema.
#[derive(Clone)]
pub struct SchemaValidator {
    schema: Value,
    compiled: Arc<jsonschema::Validator>,
    message: Template,
}

impl SchemaValidator {
    const MESSAGE: &'static str = "'{value}' does not validate against schema '{condition}'";

    /// Compiles the schema.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::InvalidSchema`] if the schema itself is
    /// invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lambda_decorators_extract::{SchemaValidator, Validator};
    /// use serde_json::json;
    ///
    /// let validator = SchemaValidator::new(json!({
    ///     "type": "object",
    ///     "properties": {"id": {"type": "integer"}},
    ///     "required": ["id"]
    /// }))
    /// .unwrap();
    ///
    /// assert!(validator.check(&json!({"id": 1})).is_ok());
    /// assert!(validator.check(&json!({"id": "1"})).is_err());
    /// ```
    pub fn new(schema: Value) -> Result<Self, DeclarationError> {
        let compiled = jsonschema::validator_for(&schema)
            .map_err(|err| DeclarationError::InvalidSchema(err.to_string()))?;
        Ok(Self {
            schema,
            compiled: Arc::new(compiled),
            message: Template::builtin(Self::MESSAGE),
        })
    }

    /// Replaces the failure message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Template::custom(message);
        self
    }

    /// Returns the schema as declared.
    #[must_use]
    pub fn schema(&self) -> &Value {
        &self.schema
    }
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema", &self.schema)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl Validator for SchemaValidator {
    fn name(&self) -> &'static str {
        "schema"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        if value.is_null() || self.compiled.is_valid(value) {
            Ok(())
        } else {
            Err(self
                .message
                .fail(self.name(), Some(value), &self.schema.to_string()))
        }
    }
}

/// JSON value kinds checked by [`TypeValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `true` or `false`.
    Boolean,
    /// A number without a fractional part.
    Integer,
    /// Any number.
    Number,
    /// A string.
    String,
    /// An array.
    Array,
    /// An object.
    Object,
}

impl ValueKind {
    /// Returns `true` if `value` is of this kind.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Boolean => value.is_boolean(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    /// Returns the lowercase name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requires a value of a given JSON kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeValidator {
    kind: ValueKind,
    message: Template,
}

impl TypeValidator {
    const MESSAGE: &'static str = "'{value}' is not of type '{condition}'";

    /// Creates the validator.
    #[must_use]
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
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

impl Validator for TypeValidator {
    fn name(&self) -> &'static str {
        "type"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        if value.is_null() || self.kind.matches(value) {
            Ok(())
        } else {
            Err(self.message.fail(self.name(), Some(value), self.kind.as_str()))
        }
    }
}
