//! Handler response envelope.
//!
//! Handlers return a [`Response`], which serializes to the proxy-integration
//! envelope serverless HTTP gateways expect:
//!
//! ```json
//! {
//!   "statusCode": 200,
//!   "headers": { "content-type": "application/json" },
//!   "body": "{\"id\":42}"
//! }
//! ```
//!
//! The body stays structured ([`Body::Json`]) while decorators work on it;
//! the response-body decorator turns it into text at the end of the chain.

use http::StatusCode;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::{json, Value};

/// The body of a [`Response`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// Text body, sent as-is.
    Text(String),
    /// Structured body, not yet serialized.
    Json(Value),
}

impl Body {
    /// Returns `true` if there is no body.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the text body, if this is a text body.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the structured body, if this is a JSON body.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// A handler response.
///
/// # Example
///
/// ```rust
/// use lambda_decorators_core::{Response, StatusCode};
/// use serde_json::json;
///
/// let response = Response::new(StatusCode::CREATED)
///     .with_header("Location", "/orders/42")
///     .with_body(json!({"id": 42}));
///
/// assert_eq!(response.header("location"), Some("/orders/42"));
/// assert_eq!(
///     response.to_envelope(),
///     json!({
///         "statusCode": 201,
///         "headers": {"Location": "/orders/42"},
///         "body": {"id": 42}
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: StatusCode,
    headers: IndexMap<String, String>,
    body: Body,
}

impl Default for Response {
    fn default() -> Self {
        Self::new(StatusCode::OK)
    }
}

impl Response {
    /// Creates an empty response with the given status.
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: IndexMap::new(),
            body: Body::Empty,
        }
    }

    /// Creates a `200 OK` response with no body.
    #[must_use]
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// Creates a `200 OK` response with a structured body.
    #[must_use]
    pub fn json(body: Value) -> Self {
        Self::ok().with_body(body)
    }

    /// Creates a `200 OK` response with a text body.
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self::ok().with_body(Body::Text(body.into()))
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Sets the status code.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Returns the headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    /// Returns a mutable reference to the headers.
    pub fn headers_mut(&mut self) -> &mut IndexMap<String, String> {
        &mut self.headers
    }

    /// Returns a header value, matching the name case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the body.
    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Replaces the body.
    pub fn set_body(&mut self, body: impl Into<Body>) {
        self.body = body.into();
    }

    /// Consumes the response and returns the body.
    #[must_use]
    pub fn into_body(self) -> Body {
        self.body
    }

    /// Returns the response as a proxy-integration envelope.
    #[must_use]
    pub fn to_envelope(&self) -> Value {
        let mut envelope = json!({ "statusCode": self.status.as_u16() });
        if !self.headers.is_empty() {
            envelope["headers"] = json!(self.headers);
        }
        match &self.body {
            Body::Empty => {}
            Body::Text(text) => envelope["body"] = Value::String(text.clone()),
            Body::Json(value) => envelope["body"] = value.clone(),
        }
        envelope
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + usize::from(!self.headers.is_empty()) + usize::from(!self.body.is_empty());
        let mut state = serializer.serialize_struct("Response", len)?;
        state.serialize_field("statusCode", &self.status.as_u16())?;
        if !self.headers.is_empty() {
            state.serialize_field("headers", &self.headers)?;
        }
        match &self.body {
            Body::Empty => {}
            Body::Text(text) => state.serialize_field("body", text)?,
            Body::Json(value) => state.serialize_field("body", value)?,
        }
        state.end()
    }
}

/// Builds the standard failure envelope.
///
/// The body is the JSON text `{"message": <message>}`, where the message is
/// either a string or a list of per-field errors.
///
/// # Example
///
/// ```rust
/// use lambda_decorators_core::{failure, StatusCode};
/// use serde_json::json;
///
/// let response = failure("Error extracting parameters", StatusCode::BAD_REQUEST);
/// assert_eq!(response.status(), StatusCode::BAD_REQUEST);
/// assert_eq!(
///     response.body().as_text(),
///     Some(r#"{"message":"Error extracting parameters"}"#)
/// );
/// ```
#[must_use]
pub fn failure(message: impl Into<Value>, status: StatusCode) -> Response {
    let body = json!({ "message": message.into() });
    Response::new(status)
        .with_header("content-type", "application/json")
        .with_body(Body::Text(body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ok_without_body() {
        let response = Response::default();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.body().is_empty());
        assert_eq!(response.to_envelope(), json!({"statusCode": 200}));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = Response::ok().with_header("Content-Type", "text/plain");
        assert_eq!(response.header("content-type"), Some("text/plain"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("text/plain"));
        assert_eq!(response.header("accept"), None);
    }

    #[test]
    fn test_serialize_matches_envelope() {
        let response = Response::json(json!({"a": "b"})).with_header("x-id", "1");
        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized, response.to_envelope());
        assert_eq!(
            serialized,
            json!({"statusCode": 200, "headers": {"x-id": "1"}, "body": {"a": "b"}})
        );
    }

    #[test]
    fn test_failure_with_field_errors() {
        let response = failure(
            json!([{"id": ["Missing mandatory value"]}]),
            StatusCode::BAD_REQUEST,
        );
        let body: Value = serde_json::from_str(response.body().as_text().unwrap()).unwrap();
        assert_eq!(body, json!({"message": [{"id": ["Missing mandatory value"]}]}));
        assert_eq!(response.header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_text_body() {
        let response = Response::text("hello");
        assert_eq!(response.body().as_text(), Some("hello"));
        assert_eq!(response.body().as_json(), None);
        assert_eq!(response.into_body(), Body::Text("hello".to_string()));
    }
}
