//! Handler trait.
//!
//! The [`Handler`] trait is the synchronous function shape every decorator
//! wraps: it takes the call's [`Invocation`] and returns a [`Response`] or a
//! [`HandlerError`].

use crate::{HandlerError, Invocation, Response};

/// Result type returned by handlers and decorators.
pub type HandlerResult = Result<Response, HandlerError>;

/// A serverless function handler.
///
/// Any `Fn(Invocation) -> HandlerResult` closure or function is a handler.
///
/// # Example
///
/// ```rust
/// use lambda_decorators_core::{Handler, HandlerError, HandlerResult, Invocation, Response};
/// use serde_json::json;
///
/// struct Echo;
///
/// impl Handler for Echo {
///     fn call(&self, invocation: Invocation) -> HandlerResult {
///         let event = invocation
///             .event()
///             .cloned()
///             .ok_or_else(|| HandlerError::validation("no event"))?;
///         Ok(Response::json(event))
///     }
/// }
///
/// let response = Echo.call(Invocation::new(json!({"a": 1}), json!({}))).unwrap();
/// assert_eq!(response.body().as_json(), Some(&json!({"a": 1})));
/// ```
pub trait Handler: Send + Sync {
    /// Handles one invocation.
    fn call(&self, invocation: Invocation) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(Invocation) -> HandlerResult + Send + Sync,
{
    fn call(&self, invocation: Invocation) -> HandlerResult {
        self(invocation)
    }
}
