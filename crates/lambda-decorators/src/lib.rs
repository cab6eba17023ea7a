//! # lambda-decorators
//!
//! Decorators for serverless function handlers.
//!
//! A handler receives the platform's `event` and `context` documents and
//! returns a proxy-style response. Decorators wrap it to:
//!
//! - extract values from the event with paths such as
//!   `/headers/Authorization[jwt]/sub` or `/body[json]/items[0]/id`,
//!   validate them and inject them as named arguments
//! - validate arguments, log invocations, add CORS headers
//! - serialize response bodies and turn errors into failure envelopes
//! - inject values from a parameter store
//!
//! ## Quick Start
//!
//! ```rust
//! use lambda_decorators::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(DecoderRegistry::new());
//! let requests = vec![
//!     ExtractionRequest::builder("/body[json]/currency")
//!         .validator(Mandatory::new())
//!         .validator(CurrencyValidator::new())
//!         .build(&registry)
//!         .unwrap(),
//! ];
//!
//! let handler = Decorated::builder(|inv: Invocation| -> HandlerResult {
//!     let currency = inv.arg("currency").cloned().unwrap_or_default();
//!     Ok(Response::json(json!({ "currency": currency })))
//! })
//! .with(HandleAllExceptions::new())
//! .with(ResponseBodyAsJson::new())
//! .with(ExtractDecorator::from_event(registry, requests))
//! .build();
//!
//! let event = json!({"body": "{\"currency\": \"GBP\"}"});
//! let response = handler.call(Invocation::new(event, json!({}))).unwrap();
//! assert_eq!(response.body().as_text(), Some(r#"{"currency":"GBP"}"#));
//! ```
//!
//! ## Crates
//!
//! | Crate          | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`core`]       | invocations, responses, handler errors                |
//! | [`extract`]    | path tokenizer, resolver, decoders, validators        |
//! | [`middleware`] | decorator chain and stock decorators                  |
//! | [`config`]     | layered configuration and parameter stores            |
//! | [`telemetry`]  | logging setup                                         |

#![doc(html_root_url = "https://docs.rs/lambda-decorators/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub use lambda_decorators_config as config;
pub use lambda_decorators_core as core;
pub use lambda_decorators_extract as extract;
pub use lambda_decorators_middleware as middleware;
pub use lambda_decorators_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// ```rust
/// use lambda_decorators::prelude::*;
/// ```
pub mod prelude {
    pub use lambda_decorators_core::{
        failure, Body, ErrorCategory, Handler, HandlerError, HandlerResult, Invocation, Response,
        StatusCode,
    };

    // Extraction and validation
    pub use lambda_decorators_extract::{
        CurrencyValidator, DateValidator, DecoderRegistry, EnumValidator, ExtractionRequest,
        Extractor, Mandatory, MaxLength, Maximum, MinLength, Minimum, NonEmpty, RegexValidator,
        SchemaValidator, TypeValidator, ValidatedArgument, Validator, ValueKind,
    };

    // Decorators
    pub use lambda_decorators_middleware::stages::{
        CorsDecorator, ExceptionHandler, ExtractDecorator, ExtractFromStore, HandleAllExceptions,
        HandleExceptions, LogDecorator, ResponseBodyAsJson, StoreParameter, ValidateDecorator,
    };
    pub use lambda_decorators_middleware::{Decorated, Decorator, Next};

    // Configuration
    pub use lambda_decorators_config::{ConfigLoader, DecoratorsConfig, ParameterStore};
}
