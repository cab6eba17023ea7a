//! Path tokenizer.
//!
//! A path such as `/parent/child[json]/items[0]/id` is split on `/`. Each
//! non-empty segment is an optional key followed by `[hint]` groups, where a
//! hint is either a list index or the name of a registered decoder.

use crate::decoder::DecoderRegistry;
use crate::error::MalformedPathError;
use std::fmt;

/// How a token addresses the current value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    /// A key in an object.
    Key(String),
    /// A position in an array.
    Index(usize),
}

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathToken {
    address: Address,
    decode_hint: Option<String>,
}

impl PathToken {
    /// Creates a token addressing an object key.
    #[must_use]
    pub fn keyed(key: impl Into<String>) -> Self {
        Self {
            address: Address::Key(key.into()),
            decode_hint: None,
        }
    }

    /// Creates a token addressing an array position.
    #[must_use]
    pub fn indexed(index: usize) -> Self {
        Self {
            address: Address::Index(index),
            decode_hint: None,
        }
    }

    /// Attaches a decoder name.
    #[must_use]
    pub fn with_decoder(mut self, hint: impl Into<String>) -> Self {
        self.decode_hint = Some(hint.into());
        self
    }

    /// Returns how this token addresses its value.
    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the key, if this is a keyed token.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match &self.address {
            Address::Key(key) => Some(key),
            Address::Index(_) => None,
        }
    }

    /// Returns the index, if this is an indexed token.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self.address {
            Address::Index(index) => Some(index),
            Address::Key(_) => None,
        }
    }

    /// Returns the decoder to apply after this step.
    #[must_use]
    pub fn decode_hint(&self) -> Option<&str> {
        self.decode_hint.as_deref()
    }
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.address {
            Address::Key(key) => write!(f, "/{key}")?,
            Address::Index(index) => write!(f, "[{index}]")?,
        }
        if let Some(hint) = &self.decode_hint {
            write!(f, "[{hint}]")?;
        }
        Ok(())
    }
}

/// Splits a path into tokens.
///
/// Hints that are not integers must name a decoder in `registry`.
///
/// # Errors
///
/// Returns [`MalformedPathError`] if the path is blank, has no segments, or
/// contains a malformed or unrecognized annotation.
///
/// # Example
///
/// ```rust
/// use lambda_decorators_extract::{path::tokenize, DecoderRegistry, PathToken};
///
/// let registry = DecoderRegistry::new();
/// let tokens = tokenize("/parent[1]/body[json]", &registry).unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         PathToken::keyed("parent"),
///         PathToken::indexed(1),
///         PathToken::keyed("body").with_decoder("json"),
///     ]
/// );
/// ```
pub fn tokenize(path: &str, registry: &DecoderRegistry) -> Result<Vec<PathToken>, MalformedPathError> {
    if path.trim().is_empty() {
        return Err(MalformedPathError::Empty);
    }

    let mut tokens = Vec::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        tokenize_segment(segment, registry, &mut tokens)?;
    }

    if tokens.is_empty() {
        return Err(MalformedPathError::NoSegments {
            path: path.to_string(),
        });
    }
    Ok(tokens)
}

fn tokenize_segment(
    segment: &str,
    registry: &DecoderRegistry,
    tokens: &mut Vec<PathToken>,
) -> Result<(), MalformedPathError> {
    let (key, mut rest) = match segment.find('[') {
        Some(pos) => segment.split_at(pos),
        None => (segment, ""),
    };
    if key.contains(']') {
        return Err(MalformedPathError::UnexpectedBracket {
            segment: segment.to_string(),
        });
    }

    let first = tokens.len();
    if !key.is_empty() {
        tokens.push(PathToken::keyed(key));
    }

    while !rest.is_empty() {
        let Some(body) = rest.strip_prefix('[') else {
            return Err(if rest.starts_with(']') {
                MalformedPathError::UnexpectedBracket {
                    segment: segment.to_string(),
                }
            } else {
                MalformedPathError::TrailingCharacters {
                    segment: segment.to_string(),
                }
            });
        };
        let Some(end) = body.find(']') else {
            return Err(MalformedPathError::UnterminatedBracket {
                segment: segment.to_string(),
            });
        };
        let hint = &body[..end];
        if hint.contains('[') {
            return Err(MalformedPathError::UnterminatedBracket {
                segment: segment.to_string(),
            });
        }
        apply_hint(hint, segment, registry, tokens, first)?;
        rest = &body[end + 1..];
    }
    Ok(())
}

fn apply_hint(
    hint: &str,
    segment: &str,
    registry: &DecoderRegistry,
    tokens: &mut Vec<PathToken>,
    first: usize,
) -> Result<(), MalformedPathError> {
    if hint.is_empty() {
        return Err(MalformedPathError::EmptyAnnotation {
            segment: segment.to_string(),
        });
    }

    if hint.bytes().all(|b| b.is_ascii_digit()) {
        let index = hint
            .parse::<usize>()
            .map_err(|_| MalformedPathError::IndexOverflow {
                hint: hint.to_string(),
                segment: segment.to_string(),
            })?;
        tokens.push(PathToken::indexed(index));
        return Ok(());
    }

    if !registry.contains(hint) {
        return Err(MalformedPathError::UnknownDecoder {
            hint: hint.to_string(),
            segment: segment.to_string(),
        });
    }

    // A decoder only applies to a token produced by this same segment.
    let target = if tokens.len() > first {
        tokens.last_mut()
    } else {
        None
    };
    match target {
        None => Err(MalformedPathError::DanglingDecoder {
            hint: hint.to_string(),
            segment: segment.to_string(),
        }),
        Some(token) if token.decode_hint.is_some() => Err(MalformedPathError::DuplicateDecoder {
            segment: segment.to_string(),
        }),
        Some(token) => {
            token.decode_hint = Some(hint.to_string());
            Ok(())
        }
    }
}

/// A parsed parameter path.
///
/// Keeps the declared text for error reporting alongside its tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamPath {
    raw: String,
    tokens: Vec<PathToken>,
}

impl ParamPath {
    /// Parses a path against a decoder registry.
    ///
    /// # Errors
    ///
    /// See [`tokenize`].
    pub fn parse(raw: impl Into<String>, registry: &DecoderRegistry) -> Result<Self, MalformedPathError> {
        let raw = raw.into();
        let tokens = tokenize(&raw, registry)?;
        Ok(Self { raw, tokens })
    }

    /// Returns the path as declared.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the tokens.
    #[must_use]
    pub fn tokens(&self) -> &[PathToken] {
        &self.tokens
    }

    /// Returns the key of the last keyed token.
    #[must_use]
    pub fn last_key(&self) -> Option<&str> {
        self.tokens.iter().rev().find_map(PathToken::key)
    }
}

impl fmt::Display for ParamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
