//! Decorator stages.
//!
//! Each stage wraps a handler with one concern. Stages are independent and
//! can be combined in any order on a [`Decorated`](crate::Decorated) handler;
//! the usual outside-in order is:
//!
//! ```text
//! HandleAllExceptions → Cors → ResponseBodyAsJson → Log → ExtractFromStore → Extract → Validate → handler
//! ```
//!
//! | Stage                  | Before the handler                  | After the handler               |
//! |------------------------|-------------------------------------|---------------------------------|
//! | [`ExtractDecorator`]   | extract, validate and inject values | -                               |
//! | [`ValidateDecorator`]  | validate existing arguments         | -                               |
//! | [`ExtractFromStore`]   | inject parameter-store values       | -                               |
//! | [`LogDecorator`]       | log arguments                       | log response                    |
//! | [`CorsDecorator`]      | -                                   | add `access-control-*` headers  |
//! | [`ResponseBodyAsJson`] | -                                   | serialize the body              |
//! | [`HandleExceptions`]   | -                                   | convert selected errors         |
//! | [`HandleAllExceptions`]| -                                   | convert every error             |

pub mod cors;
pub mod exceptions;
pub mod extract;
pub mod log;
pub mod parameter_store;
pub mod response_json;
pub mod validate;

pub use cors::CorsDecorator;
pub use exceptions::{ErrorMatcher, ExceptionHandler, HandleAllExceptions, HandleExceptions};
pub use extract::ExtractDecorator;
pub use log::LogDecorator;
pub use parameter_store::{ExtractFromStore, StoreParameter};
pub use response_json::ResponseBodyAsJson;
pub use validate::ValidateDecorator;
