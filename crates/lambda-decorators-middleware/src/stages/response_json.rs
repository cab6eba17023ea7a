//! Response body serialization.

use crate::decorator::{Decorator, Next};
use lambda_decorators_config::DEFAULT_NON_JSON_BODY_MESSAGE;
use lambda_decorators_core::{failure, Body, HandlerResult, Invocation, StatusCode};

/// Turns a structured response body into JSON text.
///
/// A handler that fails to serialize its own data (a `serde_json::Error`
/// carried by the handler error) gets the same 500 response as a body that
/// cannot be serialized here.
#[derive(Debug, Clone)]
pub struct ResponseBodyAsJson {
    message: String,
}

impl Default for ResponseBodyAsJson {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBodyAsJson {
    /// Creates the decorator.
    pub fn new() -> Self {
        Self {
            message: DEFAULT_NON_JSON_BODY_MESSAGE.to_string(),
        }
    }

    /// Replaces the 500 response message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    fn not_serializable(&self, error: &dyn std::fmt::Display) -> HandlerResult {
        tracing::error!(error = %error, "{}", self.message);
        Ok(failure(self.message.as_str(), StatusCode::INTERNAL_SERVER_ERROR))
    }
}

impl Decorator for ResponseBodyAsJson {
    fn name(&self) -> &'static str {
        "response_body_as_json"
    }

    fn process(&self, invocation: Invocation, next: Next<'_>) -> HandlerResult {
        let mut response = match next.run(invocation) {
            Ok(response) => response,
            Err(error) if error.is::<serde_json::Error>() => return self.not_serializable(&error),
            Err(error) => return Err(error),
        };

        if let Body::Json(value) = response.body() {
            match serde_json::to_string(value) {
                Ok(text) => response.set_body(Body::Text(text)),
                Err(error) => return self.not_serializable(&error),
            }
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_decorators_core::{Handler, HandlerError, Response};
    use serde_json::json;
    use std::collections::HashMap;

    fn call(handler: fn(Invocation) -> HandlerResult) -> HandlerResult {
        crate::Decorated::builder(handler)
            .with(ResponseBodyAsJson::new())
            .build()
            .call(Invocation::empty())
    }

    #[test]
    fn test_json_body_becomes_text() {
        let response = call(|_| Ok(Response::json(json!({"key": "value"})))).unwrap();
        assert_eq!(response.body().as_text(), Some(r#"{"key":"value"}"#));
    }

    #[test]
    fn test_text_and_empty_bodies_untouched() {
        let response = call(|_| Ok(Response::text("plain"))).unwrap();
        assert_eq!(response.body().as_text(), Some("plain"));

        let response = call(|_| Ok(Response::ok())).unwrap();
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_handler_serialization_failure_is_500() {
        let response = call(|_| {
            let mut data = HashMap::new();
            data.insert((1, 2), "tuple keys are not JSON");
            let body = serde_json::to_value(&data).map_err(anyhow::Error::from)?;
            Ok(Response::json(body))
        })
        .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.body().as_text(),
            Some(r#"{"message":"Response body is not JSON serializable"}"#)
        );
    }

    #[test]
    fn test_other_errors_propagate() {
        let err = call(|_| Err(HandlerError::conflict("exists"))).unwrap_err();
        assert_eq!(err.message(), "exists");
    }
}
