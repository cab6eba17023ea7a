//! Handler error types.
//!
//! [`HandlerError`] is what a wrapped handler returns when it fails. The
//! exception-handling decorators classify it by [`ErrorCategory`] or by the
//! concrete error type it carries, and turn it into a failure envelope.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categories of handler errors for classification and handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Invalid input supplied by the caller.
    Validation,
    /// Missing or invalid credentials.
    Unauthorized,
    /// Permission denied.
    Forbidden,
    /// Resource not found.
    NotFound,
    /// Conflict (e.g., concurrent modification).
    Conflict,
    /// Downstream service failure (parameter store, other APIs).
    External,
    /// Internal failure.
    Internal,
}

impl ErrorCategory {
    /// Returns the default HTTP status code for this error category.
    #[must_use]
    pub const fn default_status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::External => StatusCode::BAD_GATEWAY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error returned by a handler or by a decorator that could not complete.
///
/// # Example
///
/// ```
/// use lambda_decorators_core::{ErrorCategory, HandlerError};
///
/// let err = HandlerError::not_found("order 42");
/// assert_eq!(err.category(), ErrorCategory::NotFound);
/// assert_eq!(err.message(), "order 42");
/// ```
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The caller supplied invalid input.
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable error message.
        message: String,
    },

    /// Authentication failed.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message.
        message: String,
    },

    /// Authorization denied.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable error message.
        message: String,
    },

    /// Resource not found.
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message.
        message: String,
    },

    /// Conflict error.
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message.
        message: String,
    },

    /// A downstream service failed.
    #[error("External service error: {message}")]
    External {
        /// Human-readable error message.
        message: String,
        /// The underlying error reported by the service client.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal error.
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message.
        message: String,
    },

    /// Any other error raised by handler code.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandlerError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a forbidden error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates an external service error.
    #[must_use]
    pub fn external(message: impl Into<String>) -> Self {
        Self::External {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an external service error wrapping the client's error.
    pub fn external_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::External {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::Unauthorized { .. } => ErrorCategory::Unauthorized,
            Self::Forbidden { .. } => ErrorCategory::Forbidden,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Conflict { .. } => ErrorCategory::Conflict,
            Self::External { .. } => ErrorCategory::External,
            Self::Internal { .. } | Self::Other(_) => ErrorCategory::Internal,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.category().default_status_code()
    }

    /// Returns the bare message, without the category prefix used by `Display`.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Conflict { message }
            | Self::External { message, .. }
            | Self::Internal { message } => message.clone(),
            Self::Other(err) => err.to_string(),
        }
    }

    /// Returns `true` if this error carries an error of type `E`.
    ///
    /// Looks at the opaque error of [`HandlerError::Other`] and at the
    /// source of [`HandlerError::External`].
    #[must_use]
    pub fn is<E>(&self) -> bool
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            Self::Other(err) => err.is::<E>(),
            Self::External {
                source: Some(source),
                ..
            } => source.is::<E>(),
            _ => false,
        }
    }
}
