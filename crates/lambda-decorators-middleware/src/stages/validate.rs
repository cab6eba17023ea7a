//! Argument validation.
//!
//! Checks arguments already present on the invocation, typically ones
//! injected by an outer decorator or passed by the caller. Nothing is
//! extracted or injected.

use crate::decorator::{Decorator, Next};
use crate::stages::extract::field_errors;
use lambda_decorators_core::{failure, HandlerResult, Invocation, StatusCode};
use lambda_decorators_extract::{ExtractionError, ValidatedArgument};

/// Validates named arguments before the handler runs.
///
/// # Example
///
/// ```rust
/// use lambda_decorators_core::{Handler, HandlerResult, Invocation, Response};
/// use lambda_decorators_extract::{Mandatory, RegexValidator, ValidatedArgument};
/// use lambda_decorators_middleware::stages::ValidateDecorator;
/// use lambda_decorators_middleware::Decorated;
/// use serde_json::json;
///
/// let handler = Decorated::builder(|_: Invocation| -> HandlerResult { Ok(Response::ok()) })
///     .with(ValidateDecorator::new(vec![ValidatedArgument::new("year")
///         .validator(Mandatory::new())
///         .validator(RegexValidator::new(r"\d{4}").unwrap())]))
///     .build();
///
/// let bad = Invocation::empty().with_arg("year", json!("19"));
/// assert_eq!(handler.call(bad).unwrap().status().as_u16(), 400);
/// ```
#[derive(Debug, Clone)]
pub struct ValidateDecorator {
    arguments: Vec<ValidatedArgument>,
    group_errors: bool,
}

impl ValidateDecorator {
    /// Creates a decorator validating `arguments` in order.
    pub fn new(arguments: Vec<ValidatedArgument>) -> Self {
        Self {
            arguments,
            group_errors: false,
        }
    }

    /// Reports every failing argument instead of stopping at the first.
    #[must_use]
    pub fn group_errors(mut self, group: bool) -> Self {
        self.group_errors = group;
        self
    }

    fn check(&self, invocation: &Invocation) -> Vec<ExtractionError> {
        let mut errors = Vec::new();
        for argument in &self.arguments {
            if let Err(error) = argument.validate(invocation) {
                errors.push(error);
                if !self.group_errors {
                    break;
                }
            }
        }
        errors
    }
}

impl Decorator for ValidateDecorator {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn process(&self, invocation: Invocation, next: Next<'_>) -> HandlerResult {
        let errors = self.check(&invocation);
        if errors.is_empty() {
            return next.run(invocation);
        }

        let listed = field_errors(&errors);
        tracing::error!("Error validating parameters. Errors: {listed}");
        Ok(failure(listed, StatusCode::BAD_REQUEST))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_decorators_core::{Handler, Response};
    use lambda_decorators_extract::{Mandatory, Maximum, RegexValidator};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn message(response: &Response) -> Value {
        let body: Value = serde_json::from_str(response.body().as_text().unwrap()).unwrap();
        body["message"].clone()
    }

    fn rules() -> Vec<ValidatedArgument> {
        vec![
            ValidatedArgument::new("var1")
                .validator(Mandatory::new())
                .validator(RegexValidator::new(r"\d{4}").unwrap()),
            ValidatedArgument::new("var2").validator(Maximum::new(10)),
        ]
    }

    #[test]
    fn test_valid_arguments_reach_handler() {
        static CALLED: AtomicBool = AtomicBool::new(false);
        let handler = crate::Decorated::builder(|_: Invocation| -> HandlerResult {
            CALLED.store(true, Ordering::SeqCst);
            Ok(Response::ok())
        })
        .with(ValidateDecorator::new(rules()))
        .build();

        let invocation = Invocation::empty()
            .with_arg("var1", json!("2019"))
            .with_arg("var2", json!(3));
        assert_eq!(handler.call(invocation).unwrap().status(), StatusCode::OK);
        assert!(CALLED.load(Ordering::SeqCst));
    }

    #[test]
    fn test_stops_at_first_failure() {
        let handler = crate::Decorated::builder(|_: Invocation| -> HandlerResult {
            Ok(Response::ok())
        })
        .with(ValidateDecorator::new(rules()))
        .build();

        let invocation = Invocation::empty().with_arg("var2", json!(11));
        let response = handler.call(invocation).unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message(&response), json!([{"var1": ["Missing mandatory value"]}]));
    }

    #[test]
    fn test_grouped_failures() {
        let handler = crate::Decorated::builder(|_: Invocation| -> HandlerResult {
            Ok(Response::ok())
        })
        .with(ValidateDecorator::new(rules()).group_errors(true))
        .build();

        let invocation = Invocation::empty()
            .with_arg("var1", json!("x"))
            .with_arg("var2", json!(11));
        let response = handler.call(invocation).unwrap();
        assert_eq!(
            message(&response),
            json!([
                {"var1": ["'x' does not conform to regular expression '\\d{4}'"]},
                {"var2": ["'11' is greater than maximum value '10'"]}
            ])
        );
    }
}
