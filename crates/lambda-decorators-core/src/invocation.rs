//! Handler invocation arguments.
//!
//! An [`Invocation`] holds the named arguments of a single handler call. The
//! serverless runtime supplies `event` and `context`; decorators add more
//! (extracted parameters, values fetched from a parameter store) before the
//! handler runs.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Argument name under which the runtime event is stored.
pub const EVENT: &str = "event";

/// Argument name under which the runtime context is stored.
pub const CONTEXT: &str = "context";

/// The named arguments of one handler call.
///
/// Arguments keep insertion order, so logging and error reporting see them
/// in the order they were supplied.
///
/// # Example
///
/// ```rust
/// use lambda_decorators_core::Invocation;
/// use serde_json::json;
///
/// let mut invocation = Invocation::new(json!({"body": "{}"}), json!({"function_name": "f"}));
/// invocation.set_arg("user_id", json!("u-1"));
///
/// assert_eq!(invocation.event(), Some(&json!({"body": "{}"})));
/// assert_eq!(invocation.arg("user_id"), Some(&json!("u-1")));
/// assert_eq!(invocation.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    args: IndexMap<String, Value>,
}

impl Invocation {
    /// Creates an invocation from the runtime event and context.
    #[must_use]
    pub fn new(event: Value, context: Value) -> Self {
        let mut args = IndexMap::with_capacity(2);
        args.insert(EVENT.to_string(), event);
        args.insert(CONTEXT.to_string(), context);
        Self { args }
    }

    /// Creates an invocation with no arguments.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a named argument.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: Value) -> Self {
        self.args.insert(name.into(), value);
        self
    }

    /// Returns the runtime event, if present.
    #[must_use]
    pub fn event(&self) -> Option<&Value> {
        self.args.get(EVENT)
    }

    /// Returns the runtime context, if present.
    #[must_use]
    pub fn context(&self) -> Option<&Value> {
        self.args.get(CONTEXT)
    }

    /// Returns a named argument.
    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    /// Returns `true` if an argument with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    /// Sets a named argument, returning the previous value.
    pub fn set_arg(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.args.insert(name.into(), value)
    }

    /// Removes a named argument.
    pub fn remove_arg(&mut self, name: &str) -> Option<Value> {
        self.args.shift_remove(name)
    }

    /// Merges arguments into the invocation. Later values win.
    pub fn extend<I>(&mut self, args: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.args.extend(args);
    }

    /// Returns all arguments in insertion order.
    #[must_use]
    pub fn args(&self) -> &IndexMap<String, Value> {
        &self.args
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Returns `true` if there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Returns the arguments as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.args
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<Map<String, Value>>(),
        )
    }

    /// Deserializes the arguments into a typed parameter struct.
    ///
    /// Fields absent from the struct are ignored unless the struct denies
    /// unknown fields, so `event` and `context` do not need a home.
    ///
    /// ```rust
    /// use lambda_decorators_core::Invocation;
    /// use serde::Deserialize;
    /// use serde_json::json;
    ///
    /// #[derive(Deserialize)]
    /// struct Params {
    ///     user_id: String,
    ///     #[serde(default)]
    ///     limit: Option<u32>,
    /// }
    ///
    /// let invocation = Invocation::new(json!({}), json!({})).with_arg("user_id", json!("u-1"));
    /// let params: Params = invocation.deserialize_args().unwrap();
    /// assert_eq!(params.user_id, "u-1");
    /// assert_eq!(params.limit, None);
    /// ```
    pub fn deserialize_args<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_value())
    }
}

impl FromIterator<(String, Value)> for Invocation {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            args: iter.into_iter().collect(),
        }
    }
}
