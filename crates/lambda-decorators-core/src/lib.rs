//! # Lambda Decorators Core
//!
//! Core types shared by every lambda-decorators crate.
//!
//! This crate provides:
//!
//! - [`Invocation`] - The named arguments of one handler call (`event`,
//!   `context`, and anything decorators inject before the handler runs)
//! - [`Response`] - The `{statusCode, headers, body}` envelope handlers return
//! - [`HandlerError`] - Structured handler errors with [`ErrorCategory`]
//! - [`Handler`] - The synchronous handler trait decorators wrap
//! - [`failure`] - Builder for the standard failure envelope
//!
//! ## Example
//!
//! ```rust
//! use lambda_decorators_core::{Handler, HandlerResult, Invocation, Response};
//! use serde_json::json;
//!
//! fn hello(invocation: Invocation) -> HandlerResult {
//!     let name = invocation
//!         .event()
//!         .and_then(|event| event.get("name"))
//!         .and_then(|name| name.as_str())
//!         .unwrap_or("world");
//!     Ok(Response::json(json!({ "greeting": format!("Hello, {name}!") })))
//! }
//!
//! let response = hello.call(Invocation::new(json!({"name": "Ada"}), json!({}))).unwrap();
//! assert_eq!(response.status().as_u16(), 200);
//! ```

#![doc(html_root_url = "https://docs.rs/lambda-decorators-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod handler;
mod invocation;
mod response;

pub use error::{ErrorCategory, HandlerError};
pub use handler::{Handler, HandlerResult};
pub use invocation::{Invocation, CONTEXT, EVENT};
pub use response::{failure, Body, Response};

// Re-export for downstream crates that build responses
pub use http::StatusCode;
