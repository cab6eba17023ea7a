//! Value resolver.
//!
//! Walks a root value along a token sequence. Absence is an ordinary outcome,
//! never an error: only a value that is present but cannot be decoded
//! produces a failure.

use crate::decoder::DecoderRegistry;
use crate::error::DecodeError;
use crate::path::{Address, PathToken};
use serde_json::Value;
use std::borrow::Cow;

/// Outcome of resolving one path.
#[derive(Debug)]
pub enum Resolution {
    /// The path led to a value.
    Found(Value),
    /// Some step of the path does not exist.
    Missing,
    /// A value was present but its decoder rejected it.
    DecodeFailed(DecodeError),
}

impl Resolution {
    /// Returns the found value, if any.
    #[must_use]
    pub fn found(&self) -> Option<&Value> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` for [`Resolution::Missing`].
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Resolves `tokens` against `root`.
///
/// Values are borrowed from `root` until the first decode; only decoded
/// values and the final result are owned.
///
/// # Example
///
/// ```rust
/// use lambda_decorators_extract::{resolve, DecoderRegistry, ParamPath};
/// use serde_json::json;
///
/// let registry = DecoderRegistry::new();
/// let path = ParamPath::parse("/parent/child[json]/id", &registry).unwrap();
/// let root = json!({"parent": {"child": "{\"id\": 42}"}});
///
/// let resolution = resolve(&root, path.tokens(), &registry);
/// assert_eq!(resolution.found(), Some(&json!(42)));
/// ```
#[must_use]
pub fn resolve(root: &Value, tokens: &[PathToken], registry: &DecoderRegistry) -> Resolution {
    let mut current = Cow::Borrowed(root);

    for token in tokens {
        let Some(next) = step(current, token.address()) else {
            return Resolution::Missing;
        };
        current = match token.decode_hint() {
            Some(hint) => match decode_with(&next, hint, registry) {
                Ok(decoded) => Cow::Owned(decoded),
                Err(error) => return Resolution::DecodeFailed(error),
            },
            None => next,
        };
    }

    Resolution::Found(current.into_owned())
}

fn step<'a>(current: Cow<'a, Value>, address: &Address) -> Option<Cow<'a, Value>> {
    match current {
        Cow::Borrowed(value) => match (value, address) {
            (Value::Object(map), Address::Key(key)) => map.get(key).map(Cow::Borrowed),
            (Value::Array(items), Address::Index(index)) => items.get(*index).map(Cow::Borrowed),
            _ => None,
        },
        Cow::Owned(value) => match (value, address) {
            (Value::Object(mut map), Address::Key(key)) => map.remove(key).map(Cow::Owned),
            (Value::Array(mut items), Address::Index(index)) if *index < items.len() => {
                Some(Cow::Owned(items.swap_remove(*index)))
            }
            _ => None,
        },
    }
}

fn decode_with(value: &Value, hint: &str, registry: &DecoderRegistry) -> Result<Value, DecodeError> {
    let decoder = registry
        .get(hint)
        .ok_or_else(|| DecodeError::UnknownDecoder(hint.to_string()))?;
    let Value::String(text) = value else {
        return Err(DecodeError::NotAString {
            decoder: hint.to_string(),
            found: kind_name(value),
        });
    };
    decoder.decode(text)
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
