//! # Lambda Decorators Extract
//!
//! Path-based extraction, decoding and validation of handler parameters.
//!
//! Values are located inside the invocation's named arguments (`event`,
//! `context`, ...) with a small path language:
//!
//! | Path | Meaning |
//! |------|---------|
//! | `/parent/child` | key `child` inside key `parent` |
//! | `/parent[1]/child` | item 1 of the list under `parent`, then key `child` |
//! | `/body[json]/id` | decode the string under `body` as JSON, then key `id` |
//! | `/headers/Authorization[jwt]/sub` | decode a signed token, then claim `sub` |
//! | `[0]/id` | item 0 of a root list, then key `id` |
//!
//! Extraction runs in three steps:
//!
//! 1. **Tokenize** ([`ParamPath`]) once, when the request is declared.
//!    Malformed paths fail here with [`MalformedPathError`].
//! 2. **Resolve** ([`resolve`]) the tokens against a root value, producing a
//!    [`Resolution`]: found, missing, or decode failure. Absence is never an
//!    error at this step.
//! 3. **Validate** ([`chain::apply`]) the resolution against the request's
//!    validators and default.
//!
//! ## Example
//!
//! ```rust
//! use lambda_decorators_core::Invocation;
//! use lambda_decorators_extract::{DecoderRegistry, ExtractionRequest, Extractor, Mandatory};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(DecoderRegistry::new());
//! let requests = vec![
//!     ExtractionRequest::builder("/body[json]/id")
//!         .validator(Mandatory::new())
//!         .build(&registry)
//!         .unwrap(),
//!     ExtractionRequest::builder("/headers/x-tenant")
//!         .target("tenant")
//!         .default(json!("public"))
//!         .build(&registry)
//!         .unwrap(),
//! ];
//! let extractor = Extractor::new(registry, requests);
//!
//! let invocation = Invocation::new(json!({"body": "{\"id\": 42}", "headers": {}}), json!({}));
//! let args = extractor.extract(&invocation).unwrap();
//!
//! assert_eq!(args.get("id"), Some(&json!(42)));
//! assert_eq!(args.get("tenant"), Some(&json!("public")));
//! ```
//!
//! ## Error Handling
//!
//! Every failure that reaches the caller is an [`ExtractionError`], which
//! always maps to `400 Bad Request`:
//!
//! ```rust
//! use lambda_decorators_extract::ExtractionError;
//! use http::StatusCode;
//!
//! let err = ExtractionError::missing_source("event", "id");
//! assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
//! assert_eq!(err.error_code(), "MISSING_SOURCE");
//! ```

#![doc(html_root_url = "https://docs.rs/lambda-decorators-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod argument;
pub mod chain;
mod decoder;
mod error;
mod extractor;
pub mod path;
mod request;
mod resolver;
pub mod validator;

pub use argument::ValidatedArgument;
pub use chain::{ChainError, Settled};
pub use decoder::{Decoder, DecoderRegistry, JsonDecoder, JwtDecoder};
pub use error::{
    DecodeError, DeclarationError, ExtractionError, ExtractionErrorKind, MalformedPathError,
};
pub use extractor::{ArgumentSource, ExtractedArgs, Extractor};
pub use path::{Address, ParamPath, PathToken};
pub use request::{ExtractionRequest, ExtractionRequestBuilder};
pub use resolver::{resolve, Resolution};
pub use validator::{
    CurrencyValidator, DateValidator, EnumValidator, Mandatory, MaxLength, Maximum, MinLength,
    Minimum, NonEmpty, RegexValidator, SchemaValidator, TypeValidator, ValidationFailure,
    Validator, ValueKind,
};
