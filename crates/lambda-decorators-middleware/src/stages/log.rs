//! Invocation logging.

use crate::decorator::{Decorator, Next};
use lambda_decorators_core::{HandlerResult, Invocation};

/// Logs the invocation arguments and/or the handler response at info level.
///
/// Errors returned by the handler pass through unlogged; pair with
/// [`HandleExceptions`](super::HandleExceptions) to log those.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDecorator {
    parameters: bool,
    response: bool,
}

impl LogDecorator {
    /// Creates a decorator that logs nothing until enabled.
    pub const fn new() -> Self {
        Self {
            parameters: false,
            response: false,
        }
    }

    /// Logs the arguments before the handler runs.
    #[must_use]
    pub const fn parameters(mut self, enabled: bool) -> Self {
        self.parameters = enabled;
        self
    }

    /// Logs the response after the handler returns.
    #[must_use]
    pub const fn response(mut self, enabled: bool) -> Self {
        self.response = enabled;
        self
    }
}

impl Decorator for LogDecorator {
    fn name(&self) -> &'static str {
        "log"
    }

    fn process(&self, invocation: Invocation, next: Next<'_>) -> HandlerResult {
        if self.parameters {
            tracing::info!("Parameters: {}", invocation.to_value());
        }

        let result = next.run(invocation);

        if self.response {
            if let Ok(response) = &result {
                tracing::info!(status = response.status().as_u16(), "Response: {}", response.to_envelope());
            }
        }
        result
    }
}
