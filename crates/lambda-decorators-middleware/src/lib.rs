//! # lambda-decorators middleware
//!
//! Decorators for function handlers.
//!
//! A handler is any [`Handler`](lambda_decorators_core::Handler): a function
//! from an [`Invocation`](lambda_decorators_core::Invocation) to a
//! [`HandlerResult`](lambda_decorators_core::HandlerResult). [`Decorated`]
//! wraps it in an ordered list of [`Decorator`]s; the first one added is the
//! outermost.
//!
//! ```text
//! Invocation → d1 → d2 → ... → handler
//!                                  ↓
//! Result     ← d1 ← d2 ← ... ←─────┘
//! ```
//!
//! The [`stages`] module has the stock decorators: parameter extraction and
//! validation, logging, CORS headers, JSON bodies, error conversion and
//! parameter-store injection.

#![doc(html_root_url = "https://docs.rs/lambda-decorators-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod decorated;
pub mod decorator;
pub mod stages;

pub use decorated::{Decorated, DecoratedBuilder};
pub use decorator::{Decorator, FnDecorator, Next};
