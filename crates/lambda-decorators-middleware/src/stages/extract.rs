//! Parameter extraction.
//!
//! Runs an [`Extractor`] over the invocation arguments before the handler.
//! Extracted values are merged into the invocation under their target names.
//!
//! # Failures
//!
//! | Failure                           | Response                                  |
//! |-----------------------------------|-------------------------------------------|
//! | Missing value, rejected value     | 400, `{"message": [{field: [reason]}]}`   |
//! | Missing source argument, decoding | 400, `{"message": "Error extracting parameters"}` |
//!
//! # Example
//!
//! ```rust
//! use lambda_decorators_core::{Handler, HandlerResult, Invocation, Response};
//! use lambda_decorators_extract::{DecoderRegistry, ExtractionRequest, Mandatory};
//! use lambda_decorators_middleware::stages::ExtractDecorator;
//! use lambda_decorators_middleware::Decorated;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(DecoderRegistry::new());
//! let user_id = ExtractionRequest::builder("/headers/Authorization[jwt]/sub")
//!     .target("user_id")
//!     .validator(Mandatory::new())
//!     .build(&registry)
//!     .unwrap();
//!
//! let handler = Decorated::builder(|inv: Invocation| -> HandlerResult {
//!     Ok(Response::json(inv.arg("user_id").cloned().unwrap_or_default()))
//! })
//! .with(ExtractDecorator::from_event(registry, vec![user_id]))
//! .build();
//!
//! let response = handler.call(Invocation::new(json!({"headers": {}}), json!({}))).unwrap();
//! assert_eq!(response.status().as_u16(), 400);
//! ```

use crate::decorator::{Decorator, Next};
use lambda_decorators_config::DEFAULT_EXTRACT_FAILURE_MESSAGE;
use lambda_decorators_core::{failure, HandlerResult, Invocation, Response, StatusCode};
use lambda_decorators_extract::{
    DecoderRegistry, ExtractionError, ExtractionErrorKind, ExtractionRequest, Extractor,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Extracts declared parameters and injects them as arguments.
#[derive(Debug, Clone)]
pub struct ExtractDecorator {
    extractor: Extractor,
    group_errors: bool,
    failure_message: String,
}

impl ExtractDecorator {
    /// Creates a decorator for requests that name their own source argument.
    pub fn new(registry: Arc<DecoderRegistry>, requests: Vec<ExtractionRequest>) -> Self {
        Self {
            extractor: Extractor::new(registry, requests),
            group_errors: false,
            failure_message: DEFAULT_EXTRACT_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Creates a decorator that reads every request from the `event` argument.
    pub fn from_event(registry: Arc<DecoderRegistry>, requests: Vec<ExtractionRequest>) -> Self {
        Self::with_source(registry, requests, lambda_decorators_core::EVENT)
    }

    /// Creates a decorator that reads every request from the `context` argument.
    pub fn from_context(registry: Arc<DecoderRegistry>, requests: Vec<ExtractionRequest>) -> Self {
        Self::with_source(registry, requests, lambda_decorators_core::CONTEXT)
    }

    fn with_source(
        registry: Arc<DecoderRegistry>,
        requests: Vec<ExtractionRequest>,
        source: &str,
    ) -> Self {
        let requests = requests
            .into_iter()
            .map(|request| request.with_source(source))
            .collect();
        Self::new(registry, requests)
    }

    /// Reports every failing request instead of stopping at the first.
    #[must_use]
    pub fn group_errors(mut self, group: bool) -> Self {
        self.group_errors = group;
        self
    }

    /// Injects `null` for optional parameters that are absent.
    #[must_use]
    pub fn allow_null_defaults(mut self, allow: bool) -> Self {
        self.extractor = self.extractor.allow_null_defaults(allow);
        self
    }

    /// Replaces the message used when a source is missing or a value does
    /// not decode.
    #[must_use]
    pub fn failure_message(mut self, message: impl Into<String>) -> Self {
        self.failure_message = message.into();
        self
    }

    /// Returns the extractor.
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    fn reject(&self, errors: &[ExtractionError]) -> Response {
        for error in errors {
            tracing::error!(
                source = error.source_arg(),
                path = error.path().unwrap_or_default(),
                field = error.field(),
                error_code = error.error_code(),
                "{error}"
            );
        }

        // A source that is absent or corrupt is not the caller's field error
        let fatal = errors.iter().any(|e| {
            matches!(
                e.kind(),
                ExtractionErrorKind::MissingSource | ExtractionErrorKind::DecodeFailed
            )
        });
        if fatal {
            return failure(self.failure_message.as_str(), StatusCode::BAD_REQUEST);
        }

        let listed = field_errors(errors);
        tracing::error!("Error validating parameters. Errors: {listed}");
        failure(listed, StatusCode::BAD_REQUEST)
    }
}

/// Renders errors as `[{field: [reason]}, ...]`.
pub(crate) fn field_errors(errors: &[ExtractionError]) -> Value {
    Value::Array(
        errors
            .iter()
            .map(|error| json!({ error.field(): [error.reason()] }))
            .collect(),
    )
}

impl Decorator for ExtractDecorator {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn process(&self, mut invocation: Invocation, next: Next<'_>) -> HandlerResult {
        let extracted = if self.group_errors {
            self.extractor.extract_all(&invocation)
        } else {
            self.extractor.extract(&invocation).map_err(|e| vec![e])
        };

        match extracted {
            Ok(args) => {
                invocation.extend(args);
                next.run(invocation)
            }
            Err(errors) => Ok(self.reject(&errors)),
        }
    }
}
