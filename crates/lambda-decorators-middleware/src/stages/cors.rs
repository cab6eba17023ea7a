//! CORS response headers.
//!
//! Adds `access-control-*` headers to every successful response. A header
//! the handler already set, under any letter case, keeps its name and gets
//! the configured value appended after a comma.
//!
//! ## Example
//!
//! ```rust
//! use lambda_decorators_core::{Handler, HandlerResult, Invocation, Response};
//! use lambda_decorators_middleware::stages::CorsDecorator;
//! use lambda_decorators_middleware::Decorated;
//!
//! let handler = Decorated::builder(|_: Invocation| -> HandlerResult {
//!     Ok(Response::ok().with_header("Access-Control-Allow-Origin", "https://a.example"))
//! })
//! .with(CorsDecorator::new().allow_origin("https://b.example").max_age(600))
//! .build();
//!
//! let response = handler.call(Invocation::empty()).unwrap();
//! assert_eq!(
//!     response.header("access-control-allow-origin"),
//!     Some("https://a.example,https://b.example")
//! );
//! assert_eq!(response.header("access-control-max-age"), Some("600"));
//! ```

use crate::decorator::{Decorator, Next};
use lambda_decorators_config::CorsSection;
use lambda_decorators_core::{HandlerResult, Invocation, Response};

/// CORS header names.
pub mod headers {
    /// `Access-Control-Allow-Origin` header.
    pub const ALLOW_ORIGIN: &str = "access-control-allow-origin";
    /// `Access-Control-Allow-Methods` header.
    pub const ALLOW_METHODS: &str = "access-control-allow-methods";
    /// `Access-Control-Allow-Headers` header.
    pub const ALLOW_HEADERS: &str = "access-control-allow-headers";
    /// `Access-Control-Max-Age` header.
    pub const MAX_AGE: &str = "access-control-max-age";
}

/// Adds CORS headers to responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsDecorator {
    allow_origin: Option<String>,
    allow_methods: Option<String>,
    allow_headers: Option<String>,
    max_age: Option<u64>,
}

impl CorsDecorator {
    /// Creates a decorator that adds no headers until configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decorator from configured defaults.
    pub fn from_config(section: &CorsSection) -> Self {
        Self {
            allow_origin: section.allow_origin.clone(),
            allow_methods: section.allow_methods.clone(),
            allow_headers: section.allow_headers.clone(),
            max_age: section.max_age,
        }
    }

    /// Comma-separated allowed origins.
    #[must_use]
    pub fn allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.allow_origin = Some(origin.into());
        self
    }

    /// Comma-separated allowed methods.
    #[must_use]
    pub fn allow_methods(mut self, methods: impl Into<String>) -> Self {
        self.allow_methods = Some(methods.into());
        self
    }

    /// Comma-separated allowed request headers.
    #[must_use]
    pub fn allow_headers(mut self, headers: impl Into<String>) -> Self {
        self.allow_headers = Some(headers.into());
        self
    }

    /// Preflight cache time in seconds. Zero sends no header.
    #[must_use]
    pub const fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    fn apply(&self, response: &mut Response) {
        let max_age = self.max_age.filter(|&s| s > 0).map(|s| s.to_string());
        let values = [
            (headers::ALLOW_ORIGIN, self.allow_origin.as_deref()),
            (headers::ALLOW_METHODS, self.allow_methods.as_deref()),
            (headers::ALLOW_HEADERS, self.allow_headers.as_deref()),
            (headers::MAX_AGE, max_age.as_deref()),
        ];
        for (name, value) in values {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                append_header(response, name, value);
            }
        }
    }
}

/// Appends `value` to the header called `name` (any case), or sets it.
fn append_header(response: &mut Response, name: &str, value: &str) {
    let headers = response.headers_mut();
    match headers.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(name)) {
        Some((_, existing)) => {
            existing.push(',');
            existing.push_str(value);
        }
        None => {
            headers.insert(name.to_string(), value.to_string());
        }
    }
}

impl Decorator for CorsDecorator {
    fn name(&self) -> &'static str {
        "cors"
    }

    fn process(&self, invocation: Invocation, next: Next<'_>) -> HandlerResult {
        let mut response = next.run(invocation)?;
        self.apply(&mut response);
        Ok(response)
    }
}
