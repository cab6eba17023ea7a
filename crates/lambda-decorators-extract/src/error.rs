//! Extraction error types.
//!
//! Declaration-time errors ([`MalformedPathError`], [`DeclarationError`])
//! are programmer errors caught when a request is built. Call-time failures
//! are all normalized into [`ExtractionError`] before they leave the crate.

use crate::chain::ChainError;
use crate::validator::ValidationFailure;
use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// A declared path string is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedPathError {
    /// The path is empty or only whitespace.
    #[error("path is empty")]
    Empty,

    /// The path contains only separators.
    #[error("path '{path}' has no segments")]
    NoSegments {
        /// The offending path.
        path: String,
    },

    /// A `[` has no matching `]`.
    #[error("unterminated '[' in segment '{segment}'")]
    UnterminatedBracket {
        /// The offending segment.
        segment: String,
    },

    /// A `]` has no matching `[`.
    #[error("unexpected ']' in segment '{segment}'")]
    UnexpectedBracket {
        /// The offending segment.
        segment: String,
    },

    /// A `[]` annotation is empty.
    #[error("empty annotation in segment '{segment}'")]
    EmptyAnnotation {
        /// The offending segment.
        segment: String,
    },

    /// An annotation is neither an index nor a registered decoder.
    #[error("unknown decoder '{hint}' in segment '{segment}'")]
    UnknownDecoder {
        /// The unrecognized annotation.
        hint: String,
        /// The offending segment.
        segment: String,
    },

    /// An index annotation does not fit in `usize`.
    #[error("index '{hint}' out of range in segment '{segment}'")]
    IndexOverflow {
        /// The index text.
        hint: String,
        /// The offending segment.
        segment: String,
    },

    /// Characters follow a closing bracket.
    #[error("unexpected characters after annotation in segment '{segment}'")]
    TrailingCharacters {
        /// The offending segment.
        segment: String,
    },

    /// A decoder annotation has no key or index before it.
    #[error("decoder '{hint}' has nothing to decode in segment '{segment}'")]
    DanglingDecoder {
        /// The decoder annotation.
        hint: String,
        /// The offending segment.
        segment: String,
    },

    /// A key or index carries two decoder annotations.
    #[error("more than one decoder for the same value in segment '{segment}'")]
    DuplicateDecoder {
        /// The offending segment.
        segment: String,
    },
}

/// An extraction request could not be declared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// The path is malformed.
    #[error(transparent)]
    Path(#[from] MalformedPathError),

    /// The target name is not identifier-like.
    #[error("invalid target name '{0}'")]
    InvalidTargetName(String),

    /// The path has no key to default the target name from.
    #[error("path '{0}' has no key to name the extracted value; set a target explicitly")]
    NoTargetName(String),

    /// A schema validator was given an invalid schema.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// A decoder could not transform a value.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The value at the annotated segment is not a string.
    #[error("decoder '{decoder}' expects a string, found {found}")]
    NotAString {
        /// The decoder name.
        decoder: String,
        /// The kind of value that was found.
        found: &'static str,
    },

    /// No decoder with this name is registered.
    #[error("no decoder registered for '{0}'")]
    UnknownDecoder(String),

    /// Malformed JSON text.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed token or invalid signature.
    #[error("invalid token: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Failure reported by a custom decoder.
    #[error("{decoder}: {message}")]
    Custom {
        /// The decoder name.
        decoder: String,
        /// What went wrong.
        message: String,
    },
}

impl DecodeError {
    /// Creates an error for a custom decoder.
    pub fn custom(decoder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Custom {
            decoder: decoder.into(),
            message: message.into(),
        }
    }
}

/// What kind of extraction failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionErrorKind {
    /// The named source argument does not exist.
    MissingSource,
    /// The value is absent and a presence validator rejected it.
    Missing,
    /// A validator rejected the value.
    ValidationFailed,
    /// The value was present but could not be decoded.
    DecodeFailed,
}

/// Error that occurs during extraction or argument validation.
///
/// Carries the source argument, the field (target name) and the reason.
/// Always a client error: it describes a malformed request, not a fault in
/// the handler.
#[derive(Debug)]
pub struct ExtractionError {
    kind: ExtractionErrorKind,
    source_arg: String,
    field: String,
    path: Option<String>,
    reason: String,
    cause: Option<DecodeError>,
}

impl ExtractionError {
    /// Creates an error for a source argument that does not exist.
    #[must_use]
    pub fn missing_source(source: impl Into<String>, field: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            kind: ExtractionErrorKind::MissingSource,
            reason: format!("missing source argument '{source}'"),
            source_arg: source,
            field: field.into(),
            path: None,
            cause: None,
        }
    }

    /// Creates an error for an absent value rejected by a presence validator.
    #[must_use]
    pub fn missing(
        source: impl Into<String>,
        field: impl Into<String>,
        failure: ValidationFailure,
    ) -> Self {
        Self {
            kind: ExtractionErrorKind::Missing,
            source_arg: source.into(),
            field: field.into(),
            path: None,
            reason: failure.into_message(),
            cause: None,
        }
    }

    /// Creates an error for a value rejected by a validator.
    #[must_use]
    pub fn validation_failed(
        source: impl Into<String>,
        field: impl Into<String>,
        failure: ValidationFailure,
    ) -> Self {
        Self {
            kind: ExtractionErrorKind::ValidationFailed,
            source_arg: source.into(),
            field: field.into(),
            path: None,
            reason: failure.into_message(),
            cause: None,
        }
    }

    /// Creates an error for a value that could not be decoded.
    #[must_use]
    pub fn decode_failed(
        source: impl Into<String>,
        field: impl Into<String>,
        error: DecodeError,
    ) -> Self {
        Self {
            kind: ExtractionErrorKind::DecodeFailed,
            source_arg: source.into(),
            field: field.into(),
            path: None,
            reason: error.to_string(),
            cause: Some(error),
        }
    }

    /// Creates an error from a validation chain failure.
    #[must_use]
    pub fn from_chain(
        source: impl Into<String>,
        field: impl Into<String>,
        error: ChainError,
    ) -> Self {
        match error {
            ChainError::Absent(failure) => Self::missing(source, field, failure),
            ChainError::Rejected(failure) => Self::validation_failed(source, field, failure),
            ChainError::Decode(error) => Self::decode_failed(source, field, error),
        }
    }

    /// Attaches the declared path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Returns the kind of failure.
    #[must_use]
    pub fn kind(&self) -> ExtractionErrorKind {
        self.kind
    }

    /// Returns the name of the source argument.
    #[must_use]
    pub fn source_arg(&self) -> &str {
        &self.source_arg
    }

    /// Returns the field (target name).
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the declared path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the client-facing reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Returns the error code suitable for error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            ExtractionErrorKind::MissingSource => "MISSING_SOURCE",
            ExtractionErrorKind::Missing => "MISSING_PARAMETER",
            ExtractionErrorKind::ValidationFailed => "VALIDATION_FAILED",
            ExtractionErrorKind::DecodeFailed => "DECODE_FAILED",
        }
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(
                f,
                "{} for '{}' at {} in argument {}",
                self.reason, self.field, path, self.source_arg
            ),
            None => write!(
                f,
                "{} for '{}' in argument {}",
                self.reason, self.field, self.source_arg
            ),
        }
    }
}

impl std::error::Error for ExtractionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_missing_source_error() {
        let err = ExtractionError::missing_source("context", "user_id");

        assert_eq!(err.kind(), ExtractionErrorKind::MissingSource);
        assert_eq!(err.source_arg(), "context");
        assert_eq!(err.field(), "user_id");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "MISSING_SOURCE");
        assert!(err.to_string().contains("context"));
    }

    #[test]
    fn test_missing_error() {
        let err = ExtractionError::missing(
            "event",
            "id",
            ValidationFailure::new("mandatory", "Missing mandatory value"),
        )
        .with_path("/parent/child/id");

        assert_eq!(err.kind(), ExtractionErrorKind::Missing);
        assert_eq!(err.reason(), "Missing mandatory value");
        assert_eq!(err.path(), Some("/parent/child/id"));
        assert_eq!(err.error_code(), "MISSING_PARAMETER");
        assert_eq!(
            err.to_string(),
            "Missing mandatory value for 'id' at /parent/child/id in argument event"
        );
    }

    #[test]
    fn test_validation_failed_error() {
        let err = ExtractionError::validation_failed(
            "event",
            "email",
            ValidationFailure::new("regex", "'x' does not conform to regular expression '.+@.+'"),
        );

        assert_eq!(err.kind(), ExtractionErrorKind::ValidationFailed);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_decode_failed_keeps_cause() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ 'c': 1 }").unwrap_err();
        let err = ExtractionError::decode_failed("event", "c", DecodeError::from(json_err));

        assert_eq!(err.kind(), ExtractionErrorKind::DecodeFailed);
        assert_eq!(err.error_code(), "DECODE_FAILED");
        assert!(err.reason().starts_with("invalid JSON"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_malformed_path_display() {
        let err = MalformedPathError::UnknownDecoder {
            hint: "yaml".to_string(),
            segment: "body[yaml]".to_string(),
        };
        assert_eq!(err.to_string(), "unknown decoder 'yaml' in segment 'body[yaml]'");

        let declaration = DeclarationError::from(MalformedPathError::Empty);
        assert_eq!(declaration.to_string(), "path is empty");
    }
}
