//! Extraction request declarations.

use crate::chain::{self, ChainError, Settled};
use crate::decoder::DecoderRegistry;
use crate::error::DeclarationError;
use crate::path::ParamPath;
use crate::resolver::resolve;
use crate::validator::Validator;
use lambda_decorators_core::EVENT;
use serde_json::Value;
use std::sync::Arc;

/// One value to extract: where it is, what to call it, how to check it.
///
/// Requests are declared once, with their path already tokenized, and used
/// for every invocation.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    path: ParamPath,
    source: String,
    target: String,
    validators: Vec<Arc<dyn Validator>>,
    default: Option<Value>,
}

impl ExtractionRequest {
    /// Starts declaring a request for `path`.
    ///
    /// The source defaults to the `event` argument and the target to the
    /// last key of the path.
    pub fn builder(path: impl Into<String>) -> ExtractionRequestBuilder {
        ExtractionRequestBuilder {
            path: path.into(),
            source: EVENT.to_string(),
            target: None,
            validators: Vec::new(),
            default: None,
        }
    }

    /// Returns a copy of this request reading from another source argument.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Returns the parsed path.
    #[must_use]
    pub fn path(&self) -> &ParamPath {
        &self.path
    }

    /// Returns the name of the source argument.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the name the value is extracted as.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the validators in declared order.
    #[must_use]
    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    /// Returns the declared default.
    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Resolves and validates this request against a root value.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError`] if the value is rejected or cannot be decoded.
    pub fn settle(&self, root: &Value, registry: &DecoderRegistry) -> Result<Settled, ChainError> {
        let resolution = resolve(root, self.path.tokens(), registry);
        chain::apply(resolution, &self.validators, self.default.as_ref())
    }
}

/// Builder for [`ExtractionRequest`].
#[derive(Debug)]
#[must_use]
pub struct ExtractionRequestBuilder {
    path: String,
    source: String,
    target: Option<String>,
    validators: Vec<Arc<dyn Validator>>,
    default: Option<Value>,
}

impl ExtractionRequestBuilder {
    /// Reads from the named invocation argument instead of `event`.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Names the extracted value.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Appends a validator.
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Appends a validator shared with other requests.
    pub fn shared_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Sets the value used when the path is missing.
    pub fn default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Tokenizes the path and checks the target name.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError`] if the path is malformed, the target is
    /// not identifier-like, or no target is given and the path has no key.
    pub fn build(self, registry: &DecoderRegistry) -> Result<ExtractionRequest, DeclarationError> {
        let path = ParamPath::parse(self.path, registry)?;
        let target = match self.target {
            Some(target) => target,
            None => path
                .last_key()
                .map(str::to_string)
                .ok_or_else(|| DeclarationError::NoTargetName(path.as_str().to_string()))?,
        };
        if !is_identifier(&target) {
            return Err(DeclarationError::InvalidTargetName(target));
        }

        Ok(ExtractionRequest {
            path,
            source: self.source,
            target,
            validators: self.validators,
            default: self.default,
        })
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedPathError;
    use crate::validator::Mandatory;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let registry = DecoderRegistry::new();
        let request = ExtractionRequest::builder("/parent/my_param")
            .build(&registry)
            .unwrap();

        assert_eq!(request.source(), "event");
        assert_eq!(request.target(), "my_param");
        assert!(request.validators().is_empty());
        assert_eq!(request.default(), None);
    }

    #[test]
    fn test_target_skips_trailing_index() {
        let registry = DecoderRegistry::new();
        let request = ExtractionRequest::builder("/items[0]").build(&registry).unwrap();
        assert_eq!(request.target(), "items");
    }

    #[test]
    fn test_explicit_source_and_target() {
        let registry = DecoderRegistry::new();
        let request = ExtractionRequest::builder("/headers/Authorization[jwt]/sub")
            .source("context")
            .target("user_id")
            .validator(Mandatory::new())
            .default(json!("anonymous"))
            .build(&registry)
            .unwrap();

        assert_eq!(request.source(), "context");
        assert_eq!(request.target(), "user_id");
        assert_eq!(request.validators().len(), 1);
        assert_eq!(request.default(), Some(&json!("anonymous")));
        assert_eq!(request.with_source("event").source(), "event");
    }

    #[test]
    fn test_empty_path_fails_fast() {
        let err = ExtractionRequest::builder("")
            .build(&DecoderRegistry::new())
            .unwrap_err();
        assert_eq!(err, DeclarationError::Path(MalformedPathError::Empty));
    }

    #[test]
    fn test_invalid_target_names() {
        let registry = DecoderRegistry::new();
        let err = ExtractionRequest::builder("/a/my-param")
            .build(&registry)
            .unwrap_err();
        assert_eq!(err, DeclarationError::InvalidTargetName("my-param".to_string()));

        let err = ExtractionRequest::builder("/a")
            .target("1abc")
            .build(&registry)
            .unwrap_err();
        assert!(matches!(err, DeclarationError::InvalidTargetName(_)));

        let err = ExtractionRequest::builder("[0]").build(&registry).unwrap_err();
        assert_eq!(err, DeclarationError::NoTargetName("[0]".to_string()));

        assert!(ExtractionRequest::builder("[0]")
            .target("_first")
            .build(&registry)
            .is_ok());
    }

    #[test]
    fn test_settle() {
        let registry = DecoderRegistry::new();
        let request = ExtractionRequest::builder("/parent/child/id")
            .validator(Mandatory::new())
            .build(&registry)
            .unwrap();

        let settled = request
            .settle(&json!({"parent": {"child": {"id": 3}}}), &registry)
            .unwrap();
        assert_eq!(settled, Settled::Resolved(json!(3)));
        assert!(request.settle(&json!({"parent": {}}), &registry).is_err());
    }

    #[test]
    fn test_identifier_rule() {
        assert!(is_identifier("user_id"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a b"));
        assert!(!is_identifier("héllo"));
    }
}
