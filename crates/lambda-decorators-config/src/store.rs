//! Parameter stores.
//!
//! A [`ParameterStore`] resolves named secrets or settings (an SSM-style
//! parameter store, the process environment, a fixture map) in one batch
//! call. Names the store does not know are left out of the result rather
//! than reported as errors.

use indexmap::IndexMap;
use std::env;
use thiserror::Error;

/// A value returned by a [`ParameterStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredParameter {
    /// Name the value was stored under.
    pub name: String,
    /// Decrypted value.
    pub value: String,
}

impl StoredParameter {
    /// Creates a parameter.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Errors returned by a [`ParameterStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("parameter store unavailable: {0}")]
    Unavailable(String),

    /// The caller may not read the named parameter.
    #[error("access denied to parameter '{0}'")]
    AccessDenied(String),

    /// The store rejected the request.
    #[error("invalid parameter request: {0}")]
    InvalidRequest(String),
}

/// Batch lookup of named parameters.
///
/// Implementations are called once per invocation with every declared name
/// and must not retry internally.
pub trait ParameterStore: Send + Sync {
    /// Fetches the named parameters. Unknown names are omitted.
    fn get_parameters(&self, names: &[String]) -> Result<Vec<StoredParameter>, StoreError>;
}

/// A store backed by a fixed map.
///
/// # Example
///
/// ```
/// use lambda_decorators_config::{InMemoryParameterStore, ParameterStore};
///
/// let store = InMemoryParameterStore::new().with("/db/password", "hunter2");
/// let found = store.get_parameters(&["/db/password".to_string()]).unwrap();
/// assert_eq!(found[0].value, "hunter2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryParameterStore {
    values: IndexMap<String, String>,
}

impl InMemoryParameterStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }
}

impl ParameterStore for InMemoryParameterStore {
    fn get_parameters(&self, names: &[String]) -> Result<Vec<StoredParameter>, StoreError> {
        Ok(names
            .iter()
            .filter_map(|name| {
                self.values
                    .get(name)
                    .map(|value| StoredParameter::new(name.clone(), value.clone()))
            })
            .collect())
    }
}

/// A store that reads parameters from environment variables.
///
/// A parameter name maps to a variable by dropping leading slashes, turning
/// `/`, `-` and `.` into `_`, uppercasing, and adding the optional prefix:
/// `/db/password` with prefix `PARAM` reads `PARAM_DB_PASSWORD`.
#[derive(Debug, Clone, Default)]
pub struct EnvParameterStore {
    prefix: Option<String>,
}

impl EnvParameterStore {
    /// Creates a store without a prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that reads `{PREFIX}_{NAME}` variables.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into().to_uppercase()),
        }
    }

    /// Returns the variable a parameter name maps to.
    pub fn variable_name(&self, name: &str) -> String {
        let base: String = name
            .trim_start_matches('/')
            .chars()
            .map(|c| match c {
                '/' | '-' | '.' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        match &self.prefix {
            Some(prefix) => format!("{prefix}_{base}"),
            None => base,
        }
    }
}

impl ParameterStore for EnvParameterStore {
    fn get_parameters(&self, names: &[String]) -> Result<Vec<StoredParameter>, StoreError> {
        let mut found = Vec::with_capacity(names.len());
        for name in names {
            let variable = self.variable_name(name);
            match env::var(&variable) {
                Ok(value) => found.push(StoredParameter::new(name.clone(), value)),
                Err(env::VarError::NotPresent) => {}
                Err(env::VarError::NotUnicode(_)) => {
                    return Err(StoreError::InvalidRequest(format!(
                        "{variable} is not valid unicode"
                    )))
                }
            }
        }
        Ok(found)
    }
}
