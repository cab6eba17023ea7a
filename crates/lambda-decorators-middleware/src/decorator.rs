//! Core decorator trait and types.
//!
//! This module defines the [`Decorator`] trait that all decorator stages
//! implement. A decorator sees the invocation before the handler runs and
//! the result after it returns, and may short-circuit the chain with its own
//! response.
//!
//! # Example
//!
//! ```rust
//! use lambda_decorators_core::{HandlerResult, Invocation};
//! use lambda_decorators_middleware::{Decorator, Next};
//!
//! struct Timing;
//!
//! impl Decorator for Timing {
//!     fn name(&self) -> &'static str {
//!         "timing"
//!     }
//!
//!     fn process(&self, invocation: Invocation, next: Next<'_>) -> HandlerResult {
//!         let start = std::time::Instant::now();
//!         let result = next.run(invocation);
//!         tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "handler finished");
//!         result
//!     }
//! }
//! ```

use lambda_decorators_core::{Handler, HandlerResult, Invocation};
use std::sync::Arc;

/// A wrapper around a single handler call.
///
/// # Invariants
///
/// - A decorator calls `next.run()` at most once.
/// - A decorator that short-circuits returns its own response and the
///   handler does not run.
pub trait Decorator: Send + Sync + 'static {
    /// Returns the name of this decorator, used in logs.
    fn name(&self) -> &'static str;

    /// Processes the invocation through this decorator.
    fn process(&self, invocation: Invocation, next: Next<'_>) -> HandlerResult;
}

/// The rest of the chain: the remaining decorators, then the handler.
///
/// Consumed by [`Next::run`], so it can only be invoked once.
pub struct Next<'a> {
    decorators: &'a [Arc<dyn Decorator>],
    handler: &'a dyn Handler,
}

impl<'a> Next<'a> {
    /// Creates a chain over `decorators` ending in `handler`.
    pub fn new(decorators: &'a [Arc<dyn Decorator>], handler: &'a dyn Handler) -> Self {
        Self {
            decorators,
            handler,
        }
    }

    /// Creates a chain that calls `handler` directly.
    pub fn handler(handler: &'a dyn Handler) -> Self {
        Self::new(&[], handler)
    }

    /// Invokes the next decorator, or the handler at the end of the chain.
    pub fn run(self, invocation: Invocation) -> HandlerResult {
        match self.decorators.split_first() {
            Some((decorator, rest)) => decorator.process(invocation, Next::new(rest, self.handler)),
            None => self.handler.call(invocation),
        }
    }

    /// Returns the number of decorators left before the handler.
    pub fn remaining(&self) -> usize {
        self.decorators.len()
    }
}

/// A decorator created from a closure.
///
/// # Example
///
/// ```rust
/// use lambda_decorators_core::{HandlerResult, Invocation};
/// use lambda_decorators_middleware::{Decorator, FnDecorator, Next};
/// use serde_json::json;
///
/// let tag = FnDecorator::new(
///     "tag",
///     |mut invocation: Invocation, next: Next<'_>| -> HandlerResult {
///         invocation.set_arg("tagged", json!(true));
///         next.run(invocation)
///     },
/// );
/// assert_eq!(tag.name(), "tag");
/// ```
pub struct FnDecorator<F> {
    name: &'static str,
    func: F,
}

impl<F> FnDecorator<F> {
    /// Creates a new closure-based decorator.
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> Decorator for FnDecorator<F>
where
    F: Fn(Invocation, Next<'_>) -> HandlerResult + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn process(&self, invocation: Invocation, next: Next<'_>) -> HandlerResult {
        (self.func)(invocation, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_decorators_core::Response;
    use serde_json::{json, Value};

    struct Visit {
        name: &'static str,
    }

    impl Decorator for Visit {
        fn name(&self) -> &'static str {
            self.name
        }

        fn process(&self, mut invocation: Invocation, next: Next<'_>) -> HandlerResult {
            let mut visited = invocation
                .remove_arg("visited")
                .and_then(|v| v.as_array().cloned())
                .unwrap_or_default();
            visited.push(json!(self.name));
            invocation.set_arg("visited", Value::Array(visited));
            next.run(invocation)
        }
    }

    fn echo(invocation: Invocation) -> HandlerResult {
        Ok(Response::json(invocation.arg("visited").cloned().unwrap_or(Value::Null)))
    }

    #[test]
    fn test_decorator_name() {
        assert_eq!(Visit { name: "test" }.name(), "test");
    }

    #[test]
    fn test_next_handler() {
        let response = Next::handler(&echo).run(Invocation::empty()).unwrap();
        assert_eq!(response.body().as_json(), Some(&Value::Null));
    }

    #[test]
    fn test_decorator_chain_order() {
        let decorators: Vec<Arc<dyn Decorator>> = vec![
            Arc::new(Visit { name: "first" }),
            Arc::new(Visit { name: "second" }),
        ];
        let next = Next::new(&decorators, &echo);
        assert_eq!(next.remaining(), 2);

        let response = next.run(Invocation::empty()).unwrap();
        assert_eq!(response.body().as_json(), Some(&json!(["first", "second"])));
    }

    #[test]
    fn test_fn_decorator_short_circuits() {
        let decorators: Vec<Arc<dyn Decorator>> = vec![Arc::new(FnDecorator::new(
            "deny",
            |_: Invocation, _: Next<'_>| -> HandlerResult { Ok(Response::text("denied")) },
        ))];

        let response = Next::new(&decorators, &echo).run(Invocation::empty()).unwrap();
        assert_eq!(response.body().as_text(), Some("denied"));
    }
}
