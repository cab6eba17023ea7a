//! Decoders and the decoder registry.
//!
//! A decoder turns the text found at an annotated path segment into a
//! structured value. The registry maps annotation names to decoders; it is
//! built once at startup and shared read-only afterwards.

use crate::error::DecodeError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Transforms annotated text into a structured value.
pub trait Decoder: Send + Sync {
    /// Decodes `input`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the input is not valid for this decoder.
    fn decode(&self, input: &str) -> Result<Value, DecodeError>;
}

impl<F> Decoder for F
where
    F: Fn(&str) -> Result<Value, DecodeError> + Send + Sync,
{
    fn decode(&self, input: &str) -> Result<Value, DecodeError> {
        self(input)
    }
}

/// Decodes JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn decode(&self, input: &str) -> Result<Value, DecodeError> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Decodes a JSON Web Token into its claims.
///
/// [`JwtDecoder::unverified`] (the registry default) reads the claims without
/// checking the signature or any time-based claim, matching tokens that were
/// already verified by an upstream authorizer. Use [`JwtDecoder::hmac`] or
/// [`JwtDecoder::with_key`] to verify signatures.
pub struct JwtDecoder {
    key: DecodingKey,
    validation: Validation,
    verifies_signature: bool,
}

impl JwtDecoder {
    /// Creates a decoder that does not verify signatures.
    #[must_use]
    pub fn unverified() -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        Self {
            key: DecodingKey::from_secret(&[]),
            validation,
            verifies_signature: false,
        }
    }

    /// Creates a decoder that verifies an HMAC signature.
    ///
    /// Expiry is checked when the token carries `exp`; no claim is required.
    #[must_use]
    pub fn hmac(secret: &[u8], algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
            verifies_signature: true,
        }
    }

    /// Creates a decoder with an explicit key and validation rules.
    ///
    /// Pass `verifies_signature = false` only when `validation` had
    /// signature checking disabled.
    #[must_use]
    pub fn with_key(key: DecodingKey, validation: Validation, verifies_signature: bool) -> Self {
        Self {
            key,
            validation,
            verifies_signature,
        }
    }

    /// Returns `true` if this decoder checks signatures.
    #[must_use]
    pub fn verifies_signature(&self) -> bool {
        self.verifies_signature
    }
}

impl Default for JwtDecoder {
    fn default() -> Self {
        Self::unverified()
    }
}

impl fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("algorithms", &self.validation.algorithms)
            .field("verifies_signature", &self.verifies_signature)
            .finish_non_exhaustive()
    }
}

impl Decoder for JwtDecoder {
    fn decode(&self, input: &str) -> Result<Value, DecodeError> {
        let data = decode::<Value>(input.trim(), &self.key, &self.validation)?;
        Ok(data.claims)
    }
}

/// Named decoders available to path annotations.
///
/// # Example
///
/// ```rust
/// use lambda_decorators_extract::{DecodeError, Decoder, DecoderRegistry};
/// use serde_json::{json, Value};
///
/// let mut registry = DecoderRegistry::new();
/// registry.register("csv", |input: &str| -> Result<Value, DecodeError> {
///     Ok(input.split(',').map(|s| json!(s.trim())).collect())
/// });
///
/// assert!(registry.contains("json"));
/// let csv = registry.get("csv").unwrap();
/// assert_eq!(csv.decode("a, b").unwrap(), json!(["a", "b"]));
/// ```
#[derive(Clone)]
pub struct DecoderRegistry {
    decoders: HashMap<String, Arc<dyn Decoder>>,
}

impl DecoderRegistry {
    /// Creates a registry with the `json` and `jwt` decoders.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("json", JsonDecoder);
        registry.register("jwt", JwtDecoder::unverified());
        registry
    }

    /// Creates a registry with no decoders.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Registers a decoder, replacing any decoder with the same name.
    ///
    /// Names made only of digits are indices in paths and can never be
    /// referenced as decoders.
    pub fn register(&mut self, name: impl Into<String>, decoder: impl Decoder + 'static) -> &mut Self {
        self.decoders.insert(name.into(), Arc::new(decoder));
        self
    }

    /// Returns the decoder registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Decoder>> {
        self.decoders.get(name)
    }

    /// Returns `true` if a decoder is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.decoders.contains_key(name)
    }

    /// Returns the registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("decoders", &self.names())
            .finish()
    }
}
