//! Parameter-store injection.
//!
//! Fetches every declared parameter from a [`ParameterStore`] in a single
//! call and injects each returned value as a string argument. Parameters the
//! store does not return are left out; the handler decides whether that is
//! an error.

use crate::decorator::{Decorator, Next};
use lambda_decorators_config::ParameterStore;
use lambda_decorators_core::{HandlerError, HandlerResult, Invocation};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A parameter to fetch, and the argument it is injected as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreParameter {
    name: String,
    target: String,
}

impl StoreParameter {
    /// Fetches `name` and injects it under the same name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            target: name.clone(),
            name,
        }
    }

    /// Injects the value under `target` instead.
    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Returns the store name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the argument name.
    pub fn target_name(&self) -> &str {
        &self.target
    }
}

/// Injects values from a parameter store.
///
/// # Example
///
/// ```rust
/// use lambda_decorators_config::InMemoryParameterStore;
/// use lambda_decorators_core::{Handler, HandlerResult, Invocation, Response};
/// use lambda_decorators_middleware::stages::{ExtractFromStore, StoreParameter};
/// use lambda_decorators_middleware::Decorated;
/// use std::sync::Arc;
///
/// let store = Arc::new(InMemoryParameterStore::new().with("/payments/api-key", "k-123"));
/// let handler = Decorated::builder(|inv: Invocation| -> HandlerResult {
///     Ok(Response::text(inv.arg("api_key").and_then(|v| v.as_str()).unwrap_or("none")))
/// })
/// .with(ExtractFromStore::new(
///     store,
///     vec![StoreParameter::new("/payments/api-key").target("api_key")],
/// ))
/// .build();
///
/// let response = handler.call(Invocation::empty()).unwrap();
/// assert_eq!(response.body().as_text(), Some("k-123"));
/// ```
#[derive(Clone)]
pub struct ExtractFromStore {
    store: Arc<dyn ParameterStore>,
    parameters: Vec<StoreParameter>,
}

impl ExtractFromStore {
    /// Creates the decorator.
    pub fn new(store: Arc<dyn ParameterStore>, parameters: Vec<StoreParameter>) -> Self {
        Self { store, parameters }
    }
}

impl fmt::Debug for ExtractFromStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractFromStore")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl Decorator for ExtractFromStore {
    fn name(&self) -> &'static str {
        "extract_from_store"
    }

    fn process(&self, mut invocation: Invocation, next: Next<'_>) -> HandlerResult {
        let names: Vec<String> = self.parameters.iter().map(|p| p.name.clone()).collect();

        let found = self.store.get_parameters(&names).map_err(|error| {
            tracing::error!(parameters = ?names, error = %error, "parameter store request failed");
            HandlerError::external_with_source("failed to load parameters", error)
        })?;

        for stored in found {
            if let Some(parameter) = self.parameters.iter().find(|p| p.name == stored.name) {
                invocation.set_arg(parameter.target.clone(), Value::String(stored.value));
            }
        }
        next.run(invocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_decorators_config::{InMemoryParameterStore, StoreError, StoredParameter};
    use lambda_decorators_core::{ErrorCategory, Handler, Response};
    use serde_json::json;
    use std::sync::Mutex;

    /// Records each batch it is asked for.
    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl ParameterStore for Recording {
        fn get_parameters(&self, names: &[String]) -> Result<Vec<StoredParameter>, StoreError> {
            self.calls.lock().unwrap().push(names.to_vec());
            Ok(names
                .iter()
                .map(|n| StoredParameter::new(n.clone(), format!("value-of-{n}")))
                .collect())
        }
    }

    struct Down;

    impl ParameterStore for Down {
        fn get_parameters(&self, _: &[String]) -> Result<Vec<StoredParameter>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn echo(invocation: Invocation) -> HandlerResult {
        Ok(Response::json(invocation.to_value()))
    }

    #[test]
    fn test_single_batch_call() {
        let store = Arc::new(Recording::default());
        let decorator = ExtractFromStore::new(
            store.clone(),
            vec![StoreParameter::new("one").target("first"), StoreParameter::new("two")],
        );

        let response = crate::Decorated::builder(echo)
            .with(decorator)
            .build()
            .call(Invocation::empty())
            .unwrap();

        assert_eq!(
            response.body().as_json(),
            Some(&json!({"first": "value-of-one", "two": "value-of-two"}))
        );
        assert_eq!(*store.calls.lock().unwrap(), vec![vec!["one".to_string(), "two".to_string()]]);
    }

    #[test]
    fn test_unknown_names_not_injected() {
        let store = Arc::new(InMemoryParameterStore::new().with("known", "k"));
        let decorator = ExtractFromStore::new(
            store,
            vec![StoreParameter::new("known"), StoreParameter::new("unknown")],
        );

        let response = crate::Decorated::builder(echo)
            .with(decorator)
            .build()
            .call(Invocation::empty())
            .unwrap();
        assert_eq!(response.body().as_json(), Some(&json!({"known": "k"})));
    }

    #[test]
    fn test_store_failure_is_external_error() {
        let handler = crate::Decorated::builder(echo)
            .with(ExtractFromStore::new(Arc::new(Down), vec![StoreParameter::new("x")]))
            .build();

        let err = handler.call(Invocation::empty()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::External);
        assert!(err.is::<StoreError>());
    }
}
