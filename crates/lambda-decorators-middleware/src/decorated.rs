//! Decorated handlers.
//!
//! A [`Decorated`] handler owns a user handler and an ordered list of
//! decorators. The first decorator added is the outermost: it sees the
//! invocation first and the result last.
//!
//! ```text
//! Invocation → d1 → d2 → ... → handler
//!                                  ↓
//! Result     ← d1 ← d2 ← ... ←─────┘
//! ```

use crate::decorator::{Decorator, Next};
use lambda_decorators_core::{Handler, HandlerResult, Invocation};
use std::fmt;
use std::sync::Arc;

/// A handler wrapped in decorators. Itself a [`Handler`].
///
/// # Example
///
/// ```rust
/// use lambda_decorators_core::{Handler, HandlerResult, Invocation, Response};
/// use lambda_decorators_middleware::stages::{HandleAllExceptions, ResponseBodyAsJson};
/// use lambda_decorators_middleware::Decorated;
/// use serde_json::json;
///
/// let handler = Decorated::builder(|_: Invocation| -> HandlerResult {
///     Ok(Response::json(json!({"ok": true})))
/// })
/// .with(HandleAllExceptions::new())
/// .with(ResponseBodyAsJson::new())
/// .build();
///
/// let response = handler.call(Invocation::new(json!({}), json!({}))).unwrap();
/// assert_eq!(response.body().as_text(), Some(r#"{"ok":true}"#));
/// ```
#[derive(Clone)]
pub struct Decorated {
    decorators: Vec<Arc<dyn Decorator>>,
    handler: Arc<dyn Handler>,
}

impl Decorated {
    /// Starts wrapping `handler`.
    pub fn builder(handler: impl Handler + 'static) -> DecoratedBuilder {
        DecoratedBuilder {
            decorators: Vec::new(),
            handler: Arc::new(handler),
        }
    }

    /// Returns the decorator names, outermost first.
    pub fn decorator_names(&self) -> Vec<&'static str> {
        self.decorators.iter().map(|d| d.name()).collect()
    }
}

impl Handler for Decorated {
    fn call(&self, invocation: Invocation) -> HandlerResult {
        Next::new(&self.decorators, self.handler.as_ref()).run(invocation)
    }
}

impl fmt::Debug for Decorated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decorated")
            .field("decorators", &self.decorator_names())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Decorated`].
#[must_use]
pub struct DecoratedBuilder {
    decorators: Vec<Arc<dyn Decorator>>,
    handler: Arc<dyn Handler>,
}

impl DecoratedBuilder {
    /// Adds a decorator inside the ones already added.
    pub fn with(mut self, decorator: impl Decorator) -> Self {
        self.decorators.push(Arc::new(decorator));
        self
    }

    /// Adds a decorator shared with other handlers.
    pub fn with_shared(mut self, decorator: Arc<dyn Decorator>) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// Finishes the decorated handler.
    pub fn build(self) -> Decorated {
        Decorated {
            decorators: self.decorators,
            handler: self.handler,
        }
    }
}

impl fmt::Debug for DecoratedBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.decorators.iter().map(|d| d.name()).collect();
        f.debug_struct("DecoratedBuilder")
            .field("decorators", &names)
            .finish_non_exhaustive()
    }
}
