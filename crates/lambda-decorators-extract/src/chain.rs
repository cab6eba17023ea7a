//! Validation chain.
//!
//! Turns a [`Resolution`] into a settled value by running the request's
//! validators in order, stopping at the first failure.

use crate::error::DecodeError;
use crate::resolver::Resolution;
use crate::validator::{ValidationFailure, Validator};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Terminal state of one request that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    /// The value was found and every validator accepted it.
    Resolved(Value),
    /// The value was missing and the declared default was used.
    Defaulted(Value),
    /// The value was missing, optional, and has no default.
    Absent,
}

impl Settled {
    /// Returns the value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Resolved(value) | Self::Defaulted(value) => Some(value),
            Self::Absent => None,
        }
    }
}

/// Terminal failure of one request.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The value was missing and a presence validator rejected that.
    #[error("{0}")]
    Absent(ValidationFailure),

    /// A validator rejected the found value.
    #[error("{0}")]
    Rejected(ValidationFailure),

    /// The value could not be decoded; validators did not run.
    #[error(transparent)]
    Decode(DecodeError),
}

/// Settles a resolution.
///
/// A missing value with a declared default yields the default without
/// running any validator. A decode failure is always an error.
///
/// # Errors
///
/// Returns [`ChainError`] on the first validator failure or on a decode
/// failure.
///
/// # Example
///
/// ```rust
/// use lambda_decorators_extract::chain::{apply, Settled};
/// use lambda_decorators_extract::{Mandatory, Resolution, Validator};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let validators: Vec<Arc<dyn Validator>> = vec![Arc::new(Mandatory::new())];
///
/// let settled = apply(Resolution::Missing, &validators, Some(&json!("dflt"))).unwrap();
/// assert_eq!(settled, Settled::Defaulted(json!("dflt")));
///
/// assert!(apply(Resolution::Missing, &validators, None).is_err());
/// ```
pub fn apply(
    resolution: Resolution,
    validators: &[Arc<dyn Validator>],
    default: Option<&Value>,
) -> Result<Settled, ChainError> {
    match resolution {
        Resolution::Found(value) => {
            for validator in validators {
                validator.check(&value).map_err(ChainError::Rejected)?;
            }
            Ok(Settled::Resolved(value))
        }
        Resolution::Missing => {
            if let Some(default) = default {
                return Ok(Settled::Defaulted(default.clone()));
            }
            for validator in validators {
                validator.check_absent().map_err(ChainError::Absent)?;
            }
            Ok(Settled::Absent)
        }
        Resolution::DecodeFailed(error) => Err(ChainError::Decode(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{Mandatory, MaxLength, Minimum, RegexValidator};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts every check so tests can assert which validators ran.
    #[derive(Debug, Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl Validator for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn check(&self, _: &Value) -> Result<(), ValidationFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn check_absent(&self) -> Result<(), ValidationFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_found_passes_all_validators() {
        let validators: Vec<Arc<dyn Validator>> =
            vec![Arc::new(Mandatory::new()), Arc::new(Minimum::new(1))];
        let settled = apply(Resolution::Found(json!(5)), &validators, None).unwrap();
        assert_eq!(settled, Settled::Resolved(json!(5)));
    }

    #[test]
    fn test_first_failure_wins() {
        let validators: Vec<Arc<dyn Validator>> = vec![
            Arc::new(RegexValidator::new("[a-z]+").unwrap()),
            Arc::new(MaxLength::new(1)),
        ];
        let err = apply(Resolution::Found(json!("ABC")), &validators, None).unwrap_err();
        let ChainError::Rejected(failure) = err else {
            panic!("expected a rejection, got {err:?}");
        };
        assert_eq!(failure.validator(), "regex");
    }

    #[test]
    fn test_default_skips_validators() {
        let counting = Arc::new(Counting::default());
        let validators: Vec<Arc<dyn Validator>> = vec![counting.clone(), Arc::new(Mandatory::new())];

        let settled = apply(Resolution::Missing, &validators, Some(&json!("fallback"))).unwrap();
        assert_eq!(settled, Settled::Defaulted(json!("fallback")));
        assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_missing_optional_is_absent() {
        let counting = Arc::new(Counting::default());
        let validators: Vec<Arc<dyn Validator>> = vec![counting.clone(), Arc::new(Minimum::new(0))];

        let settled = apply(Resolution::Missing, &validators, None).unwrap();
        assert_eq!(settled, Settled::Absent);
        assert_eq!(settled.into_value(), None);
        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_mandatory_fails() {
        let validators: Vec<Arc<dyn Validator>> = vec![Arc::new(Mandatory::new())];
        let err = apply(Resolution::Missing, &validators, None).unwrap_err();
        assert!(matches!(err, ChainError::Absent(_)));
        assert_eq!(err.to_string(), "Missing mandatory value");
    }

    #[test]
    fn test_decode_failure_never_validates() {
        let counting = Arc::new(Counting::default());
        let validators: Vec<Arc<dyn Validator>> = vec![counting.clone()];
        let error = DecodeError::custom("csv", "bad row");

        let err = apply(Resolution::DecodeFailed(error), &validators, Some(&json!(1))).unwrap_err();
        assert!(matches!(err, ChainError::Decode(_)));
        assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
    }
}
