//! Error-to-response conversion.
//!
//! [`HandleExceptions`] turns selected handler errors into failure responses
//! and lets the rest propagate. [`HandleAllExceptions`] converts every error.

use crate::decorator::{Decorator, Next};
use lambda_decorators_core::{
    failure, ErrorCategory, HandlerError, HandlerResult, Invocation, StatusCode,
};
use std::fmt;
use std::sync::Arc;

/// Selects the handler errors an [`ExceptionHandler`] applies to.
#[derive(Clone)]
pub enum ErrorMatcher {
    /// Errors of one category.
    Category(ErrorCategory),
    /// Errors carrying a concrete error type.
    Type {
        /// Type name, for diagnostics.
        name: &'static str,
        /// Tests the error.
        test: fn(&HandlerError) -> bool,
    },
    /// Errors accepted by a predicate.
    Predicate(Arc<dyn Fn(&HandlerError) -> bool + Send + Sync>),
}

impl ErrorMatcher {
    /// Returns `true` if `error` is selected.
    pub fn matches(&self, error: &HandlerError) -> bool {
        match self {
            Self::Category(category) => error.category() == *category,
            Self::Type { test, .. } => test(error),
            Self::Predicate(predicate) => predicate(error),
        }
    }
}

impl fmt::Debug for ErrorMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(category) => f.debug_tuple("Category").field(category).finish(),
            Self::Type { name, .. } => f.debug_tuple("Type").field(name).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Maps matching errors to a failure response.
#[derive(Debug, Clone)]
pub struct ExceptionHandler {
    matcher: ErrorMatcher,
    friendly_message: Option<String>,
    status: StatusCode,
}

impl ExceptionHandler {
    fn with_matcher(matcher: ErrorMatcher) -> Self {
        Self {
            matcher,
            friendly_message: None,
            status: StatusCode::BAD_REQUEST,
        }
    }

    /// Handles errors of `category`.
    pub fn category(category: ErrorCategory) -> Self {
        Self::with_matcher(ErrorMatcher::Category(category))
    }

    /// Handles errors that carry an `E`, either as the opaque handler error
    /// or as the source of an external error.
    ///
    /// ```rust
    /// use lambda_decorators_core::HandlerError;
    /// use lambda_decorators_middleware::stages::ExceptionHandler;
    ///
    /// let handler = ExceptionHandler::of_type::<std::num::ParseIntError>()
    ///     .friendly_message("Bad number");
    /// let parse = "x".parse::<i32>().unwrap_err();
    /// assert!(handler.matches(&HandlerError::from(anyhow::Error::from(parse))));
    /// ```
    pub fn of_type<E>() -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::with_matcher(ErrorMatcher::Type {
            name: std::any::type_name::<E>(),
            test: HandlerError::is::<E>,
        })
    }

    /// Handles errors accepted by `predicate`.
    pub fn when(predicate: impl Fn(&HandlerError) -> bool + Send + Sync + 'static) -> Self {
        Self::with_matcher(ErrorMatcher::Predicate(Arc::new(predicate)))
    }

    /// Message returned instead of the error's own text.
    #[must_use]
    pub fn friendly_message(mut self, message: impl Into<String>) -> Self {
        self.friendly_message = Some(message.into());
        self
    }

    /// Status of the failure response. Defaults to 400.
    #[must_use]
    pub const fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Returns `true` if this handler applies to `error`.
    pub fn matches(&self, error: &HandlerError) -> bool {
        self.matcher.matches(error)
    }
}

/// Converts errors selected by a list of [`ExceptionHandler`]s.
///
/// The first matching handler wins. Unmatched errors propagate unchanged.
///
/// # Example
///
/// ```rust
/// use lambda_decorators_core::{ErrorCategory, Handler, HandlerError, HandlerResult, Invocation};
/// use lambda_decorators_middleware::stages::{ExceptionHandler, HandleExceptions};
/// use lambda_decorators_middleware::Decorated;
///
/// let handler = Decorated::builder(|_: Invocation| -> HandlerResult {
///     Err(HandlerError::not_found("order 42"))
/// })
/// .with(HandleExceptions::new(vec![
///     ExceptionHandler::category(ErrorCategory::NotFound).friendly_message("No such order"),
/// ]))
/// .build();
///
/// let response = handler.call(Invocation::empty()).unwrap();
/// assert_eq!(response.body().as_text(), Some(r#"{"message":"No such order"}"#));
/// ```
#[derive(Debug, Clone)]
pub struct HandleExceptions {
    handlers: Vec<ExceptionHandler>,
}

impl HandleExceptions {
    /// Creates the decorator.
    pub fn new(handlers: Vec<ExceptionHandler>) -> Self {
        Self { handlers }
    }
}

impl Decorator for HandleExceptions {
    fn name(&self) -> &'static str {
        "handle_exceptions"
    }

    fn process(&self, invocation: Invocation, next: Next<'_>) -> HandlerResult {
        let error = match next.run(invocation) {
            Ok(response) => return Ok(response),
            Err(error) => error,
        };

        let Some(handler) = self.handlers.iter().find(|h| h.matches(&error)) else {
            return Err(error);
        };

        let text = error.message();
        let message = match (&handler.friendly_message, text.is_empty()) {
            (Some(friendly), false) => {
                tracing::error!(category = ?error.category(), "{friendly}: {text}");
                friendly.clone()
            }
            (Some(friendly), true) => {
                tracing::error!(category = ?error.category(), "{friendly}");
                friendly.clone()
            }
            (None, _) => {
                tracing::error!(category = ?error.category(), "{text}");
                text
            }
        };
        Ok(failure(message, handler.status))
    }
}

/// Converts every handler error into a 400 response with the error's text.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandleAllExceptions;

impl HandleAllExceptions {
    /// Creates the decorator.
    pub const fn new() -> Self {
        Self
    }
}

impl Decorator for HandleAllExceptions {
    fn name(&self) -> &'static str {
        "handle_all_exceptions"
    }

    fn process(&self, invocation: Invocation, next: Next<'_>) -> HandlerResult {
        next.run(invocation).or_else(|error| {
            let text = error.message();
            tracing::error!(category = ?error.category(), "{text}");
            Ok(failure(text, StatusCode::BAD_REQUEST))
        })
    }
}
