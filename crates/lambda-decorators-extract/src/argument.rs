//! Validation of arguments already present on an invocation.

use crate::chain::{self, ChainError};
use crate::error::ExtractionError;
use crate::extractor::ArgumentSource;
use crate::resolver::Resolution;
use crate::validator::Validator;
use std::sync::Arc;

/// Validators applied directly to a named argument, without a path.
///
/// A missing argument is treated as an absent value, so only presence
/// validators reject it.
///
/// # Example
///
/// ```rust
/// use lambda_decorators_core::Invocation;
/// use lambda_decorators_extract::{RegexValidator, ValidatedArgument};
/// use serde_json::json;
///
/// let year = ValidatedArgument::new("var1").validator(RegexValidator::new(r"\d{4}").unwrap());
///
/// let invocation = Invocation::empty().with_arg("var1", json!("2019"));
/// assert!(year.validate(&invocation).is_ok());
///
/// let invocation = Invocation::empty().with_arg("var1", json!("x"));
/// assert_eq!(year.validate(&invocation).unwrap_err().field(), "var1");
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedArgument {
    name: String,
    validators: Vec<Arc<dyn Validator>>,
}

impl ValidatedArgument {
    /// Creates a rule for the argument called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            validators: Vec::new(),
        }
    }

    /// Appends a validator.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Appends a validator shared with other rules.
    #[must_use]
    pub fn shared_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Returns the argument name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the validators against the argument.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError`] on the first validator failure.
    pub fn validate(&self, source: &impl ArgumentSource) -> Result<(), ExtractionError> {
        let resolution = source
            .argument(&self.name)
            .cloned()
            .map_or(Resolution::Missing, Resolution::Found);

        chain::apply(resolution, &self.validators, None)
            .map(drop)
            .map_err(|error: ChainError| ExtractionError::from_chain(&self.name, &self.name, error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionErrorKind;
    use crate::validator::{Mandatory, MaxLength};
    use lambda_decorators_core::Invocation;
    use serde_json::json;

    #[test]
    fn test_missing_argument_is_absent() {
        let optional = ValidatedArgument::new("var2").validator(MaxLength::new(3));
        assert!(optional.validate(&Invocation::empty()).is_ok());

        let required = ValidatedArgument::new("var2").validator(Mandatory::new());
        let err = required.validate(&Invocation::empty()).unwrap_err();
        assert_eq!(err.kind(), ExtractionErrorKind::Missing);
        assert_eq!(err.reason(), "Missing mandatory value");
    }

    #[test]
    fn test_first_failing_validator_reports() {
        let rule = ValidatedArgument::new("code")
            .validator(Mandatory::new())
            .validator(MaxLength::new(2));
        let invocation = Invocation::empty().with_arg("code", json!("abcd"));

        let err = rule.validate(&invocation).unwrap_err();
        assert_eq!(err.kind(), ExtractionErrorKind::ValidationFailed);
        assert_eq!(err.reason(), "'abcd' is longer than maximum length '2'");
        assert_eq!(rule.name(), "code");
    }
}
