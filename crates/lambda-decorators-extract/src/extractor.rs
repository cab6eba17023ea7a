//! Runs extraction requests against an invocation's arguments.

use crate::chain::Settled;
use crate::decoder::DecoderRegistry;
use crate::error::ExtractionError;
use crate::request::ExtractionRequest;
use indexmap::IndexMap;
use lambda_decorators_core::Invocation;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Named root values that requests read from.
pub trait ArgumentSource {
    /// Returns the argument called `name`.
    fn argument(&self, name: &str) -> Option<&Value>;
}

impl ArgumentSource for Invocation {
    fn argument(&self, name: &str) -> Option<&Value> {
        self.arg(name)
    }
}

impl ArgumentSource for IndexMap<String, Value> {
    fn argument(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl ArgumentSource for HashMap<String, Value> {
    fn argument(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl ArgumentSource for Map<String, Value> {
    fn argument(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// Extracted values by target name, in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedArgs(IndexMap<String, Value>);

impl ExtractedArgs {
    /// Returns the value extracted as `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns `true` if a value was extracted as `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the number of extracted values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(target, value)` pairs.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Returns the underlying map.
    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.0
    }

    /// Deserializes the values into a typed options struct.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error if the values do not fit `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let object: Map<String, Value> = self
            .0
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        serde_json::from_value(Value::Object(object))
    }

    fn insert(&mut self, target: String, value: Value) {
        self.0.insert(target, value);
    }
}

impl IntoIterator for ExtractedArgs {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExtractedArgs {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Runs a fixed list of requests against named arguments.
///
/// # Example
///
/// ```rust
/// use lambda_decorators_extract::{DecoderRegistry, ExtractionRequest, Extractor, Mandatory};
/// use serde_json::json;
/// use std::collections::HashMap;
/// use std::sync::Arc;
///
/// let registry = Arc::new(DecoderRegistry::new());
/// let extractor = Extractor::new(
///     registry.clone(),
///     vec![
///         ExtractionRequest::builder("/a").validator(Mandatory::new()).build(&registry).unwrap(),
///         ExtractionRequest::builder("/b").validator(Mandatory::new()).build(&registry).unwrap(),
///     ],
/// );
///
/// let args = HashMap::from([("event".to_string(), json!({}))]);
/// let errors = extractor.extract_all(&args).unwrap_err();
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors[0].field(), "a");
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    registry: Arc<DecoderRegistry>,
    requests: Vec<ExtractionRequest>,
    allow_null_defaults: bool,
}

impl Extractor {
    /// Creates an extractor.
    #[must_use]
    pub fn new(registry: Arc<DecoderRegistry>, requests: Vec<ExtractionRequest>) -> Self {
        Self {
            registry,
            requests,
            allow_null_defaults: false,
        }
    }

    /// Emits `null` for optional values that are missing and have no
    /// default, instead of leaving them out.
    #[must_use]
    pub fn allow_null_defaults(mut self, allow: bool) -> Self {
        self.allow_null_defaults = allow;
        self
    }

    /// Returns the requests in declared order.
    #[must_use]
    pub fn requests(&self) -> &[ExtractionRequest] {
        &self.requests
    }

    /// Returns the decoder registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<DecoderRegistry> {
        &self.registry
    }

    /// Runs every request in order and stops at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the [`ExtractionError`] of the first failing request.
    pub fn extract(&self, sources: &impl ArgumentSource) -> Result<ExtractedArgs, ExtractionError> {
        let mut args = ExtractedArgs::default();
        for request in &self.requests {
            if let Some(value) = self.run(request, sources)? {
                args.insert(request.target().to_string(), value);
            }
        }
        Ok(args)
    }

    /// Runs every request in order and collects one error per failing
    /// request.
    ///
    /// # Errors
    ///
    /// Returns all failures, in request order, if any request failed.
    pub fn extract_all(
        &self,
        sources: &impl ArgumentSource,
    ) -> Result<ExtractedArgs, Vec<ExtractionError>> {
        let mut args = ExtractedArgs::default();
        let mut errors = Vec::new();
        for request in &self.requests {
            match self.run(request, sources) {
                Ok(Some(value)) => args.insert(request.target().to_string(), value),
                Ok(None) => {}
                Err(error) => errors.push(error),
            }
        }
        if errors.is_empty() {
            Ok(args)
        } else {
            Err(errors)
        }
    }

    fn run(
        &self,
        request: &ExtractionRequest,
        sources: &impl ArgumentSource,
    ) -> Result<Option<Value>, ExtractionError> {
        let root = sources
            .argument(request.source())
            .ok_or_else(|| ExtractionError::missing_source(request.source(), request.target()))?;

        let settled = request.settle(root, &self.registry).map_err(|error| {
            ExtractionError::from_chain(request.source(), request.target(), error)
                .with_path(request.path().as_str())
        })?;

        Ok(match settled {
            Settled::Resolved(value) | Settled::Defaulted(value) => Some(value),
            Settled::Absent if self.allow_null_defaults => Some(Value::Null),
            Settled::Absent => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionErrorKind;
    use crate::validator::{Mandatory, Minimum};
    use serde::Deserialize;
    use serde_json::json;

    fn extractor(requests: Vec<ExtractionRequest>) -> Extractor {
        Extractor::new(Arc::new(DecoderRegistry::new()), requests)
    }

    fn request(path: &str) -> crate::ExtractionRequestBuilder {
        ExtractionRequest::builder(path)
    }

    #[test]
    fn test_extract_in_declared_order() {
        let registry = DecoderRegistry::new();
        let extractor = extractor(vec![
            request("/b").build(&registry).unwrap(),
            request("/a").build(&registry).unwrap(),
        ]);
        let invocation = Invocation::new(json!({"a": 1, "b": 2}), json!({}));

        let args = extractor.extract(&invocation).unwrap();
        let order: Vec<&str> = args.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn test_extract_from_context() {
        let registry = DecoderRegistry::new();
        let extractor = extractor(vec![request("/function_name")
            .source("context")
            .build(&registry)
            .unwrap()]);
        let invocation = Invocation::new(json!({}), json!({"function_name": "orders"}));

        let args = extractor.extract(&invocation).unwrap();
        assert_eq!(args.get("function_name"), Some(&json!("orders")));
    }

    #[test]
    fn test_extract_stops_at_first_failure() {
        let registry = DecoderRegistry::new();
        let extractor = extractor(vec![
            request("/a").validator(Mandatory::new()).build(&registry).unwrap(),
            request("/b").validator(Mandatory::new()).build(&registry).unwrap(),
        ]);

        let err = extractor
            .extract(&Invocation::new(json!({}), json!({})))
            .unwrap_err();
        assert_eq!(err.field(), "a");
        assert_eq!(err.kind(), ExtractionErrorKind::Missing);
        assert_eq!(err.path(), Some("/a"));
    }

    #[test]
    fn test_extract_all_groups_errors() {
        let registry = DecoderRegistry::new();
        let extractor = extractor(vec![
            request("/a").validator(Mandatory::new()).build(&registry).unwrap(),
            request("/ok").build(&registry).unwrap(),
            request("/n").validator(Minimum::new(10)).build(&registry).unwrap(),
        ]);

        let errors = extractor
            .extract_all(&Invocation::new(json!({"ok": true, "n": 3}), json!({})))
            .unwrap_err();
        let fields: Vec<&str> = errors.iter().map(ExtractionError::field).collect();
        assert_eq!(fields, vec!["a", "n"]);
        assert_eq!(errors[1].kind(), ExtractionErrorKind::ValidationFailed);
    }

    #[test]
    fn test_absent_optional_is_omitted() {
        let registry = DecoderRegistry::new();
        let extractor = extractor(vec![request("/maybe").build(&registry).unwrap()]);

        let args = extractor
            .extract(&Invocation::new(json!({}), json!({})))
            .unwrap();
        assert!(!args.contains("maybe"));
        assert!(args.is_empty());
    }

    #[test]
    fn test_allow_null_defaults() {
        let registry = DecoderRegistry::new();
        let extractor = extractor(vec![request("/maybe").build(&registry).unwrap()])
            .allow_null_defaults(true);

        let args = extractor
            .extract(&Invocation::new(json!({}), json!({})))
            .unwrap();
        assert_eq!(args.get("maybe"), Some(&Value::Null));
    }

    #[test]
    fn test_missing_source_argument() {
        let registry = DecoderRegistry::new();
        let extractor = extractor(vec![request("/a").source("claims").build(&registry).unwrap()]);

        let err = extractor
            .extract(&Invocation::new(json!({}), json!({})))
            .unwrap_err();
        assert_eq!(err.kind(), ExtractionErrorKind::MissingSource);
        assert_eq!(err.source_arg(), "claims");
    }

    #[test]
    fn test_decode_failure_with_default_still_fails() {
        let registry = DecoderRegistry::new();
        let extractor = extractor(vec![request("/a[json]/c")
            .default(json!(0))
            .build(&registry)
            .unwrap()]);

        let err = extractor
            .extract(&Invocation::new(json!({"a": "{ 'c': 1 }"}), json!({})))
            .unwrap_err();
        assert_eq!(err.kind(), ExtractionErrorKind::DecodeFailed);
        assert_eq!(err.field(), "c");
    }

    #[test]
    fn test_other_argument_sources() {
        let registry = DecoderRegistry::new();
        let extractor = extractor(vec![request("/x").build(&registry).unwrap()]);

        let mut map = Map::new();
        map.insert("event".to_string(), json!({"x": 1}));
        assert_eq!(extractor.extract(&map).unwrap().get("x"), Some(&json!(1)));

        let index: IndexMap<String, Value> = [("event".to_string(), json!({"x": 2}))].into();
        assert_eq!(extractor.extract(&index).unwrap().get("x"), Some(&json!(2)));
    }

    #[test]
    fn test_deserialize_into_options() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Options {
            user_id: String,
            limit: Option<u32>,
        }

        let registry = DecoderRegistry::new();
        let extractor = extractor(vec![
            request("/user").target("user_id").build(&registry).unwrap(),
            request("/query/limit").build(&registry).unwrap(),
        ]);
        let args = extractor
            .extract(&Invocation::new(json!({"user": "u-1"}), json!({})))
            .unwrap();

        let options: Options = args.deserialize().unwrap();
        assert_eq!(
            options,
            Options {
                user_id: "u-1".to_string(),
                limit: None
            }
        );
    }
}
