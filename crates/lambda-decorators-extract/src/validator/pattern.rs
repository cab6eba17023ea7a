//! Validators for the shape of string values, plus membership checks.

use super::{display_value, Template, ValidationFailure, Validator};
use chrono::format::{parse, ParseErrorKind, Parsed, StrftimeItems};
use regex::Regex;
use serde_json::Value;

/// Requires a string to match a regular expression in full.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: String,
    regex: Regex,
    message: Template,
}

impl RegexValidator {
    const MESSAGE: &'static str = "'{value}' does not conform to regular expression '{condition}'";

    /// Compiles the validator. The whole value must match, as if the pattern
    /// were anchored at both ends.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            message: Template::builtin(Self::MESSAGE),
        })
    }

    /// Replaces the failure message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Template::custom(message);
        self
    }

    /// Returns the pattern as declared.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Validator for RegexValidator {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        let matched = match value {
            Value::Null => true,
            Value::String(text) => self.regex.is_match(text),
            _ => false,
        };
        if matched {
            Ok(())
        } else {
            Err(self.message.fail(self.name(), Some(value), &self.pattern))
        }
    }
}

/// Requires a string to be a date or time in a `strftime`-style format.
///
/// Partial formats such as `%Y-%m` are accepted; impossible dates such as
/// `2019-02-30` are not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateValidator {
    format: String,
    message: Template,
}

const DEFAULT_YEAR: i64 = 1900;

impl DateValidator {
    const MESSAGE: &'static str = "'{value}' is not a '{condition}' date";

    /// Creates the validator for `format`, e.g. `%Y-%m-%d %H:%M:%S`.
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            message: Template::builtin(Self::MESSAGE),
        }
    }

    /// Replaces the failure message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Template::custom(message);
        self
    }

    fn matches(&self, text: &str) -> bool {
        let mut parsed = Parsed::default();
        if parse(&mut parsed, text, StrftimeItems::new(&self.format)).is_err() {
            return false;
        }
        let has_year = parsed.year().is_some()
            || parsed.year_div_100().is_some()
            || parsed.year_mod_100().is_some()
            || parsed.isoyear().is_some();
        // Dates without a year are checked against 1900, a non-leap year
        if !has_year && parsed.set_year(DEFAULT_YEAR).is_err() {
            return false;
        }
        match parsed.to_naive_date() {
            Ok(_) => true,
            Err(err) => err.kind() == ParseErrorKind::NotEnough,
        }
    }
}

impl Validator for DateValidator {
    fn name(&self) -> &'static str {
        "date"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        let valid = match value {
            Value::Null => true,
            Value::String(text) => self.matches(text),
            _ => false,
        };
        if valid {
            Ok(())
        } else {
            Err(self.message.fail(self.name(), Some(value), &self.format))
        }
    }
}

/// ISO 4217 currency codes.
const CURRENCIES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD", "BDT",
    "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BOV", "BRL", "BSD", "BTN", "BWP", "BYN", "BZD",
    "CAD", "CDF", "CHE", "CHF", "CHW", "CLF", "CLP", "CNY", "COP", "COU", "CRC", "CUC", "CUP",
    "CVE", "CZK", "DJF", "DKK", "DOP", "DZD", "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "GBP",
    "GEL", "GHS", "GIP", "GMD", "GNF", "GTQ", "GYD", "HKD", "HNL", "HRK", "HTG", "HUF", "IDR",
    "ILS", "INR", "IQD", "IRR", "ISK", "JMD", "JOD", "JPY", "KES", "KGS", "KHR", "KMF", "KPW",
    "KRW", "KWD", "KYD", "KZT", "LAK", "LBP", "LKR", "LRD", "LSL", "LYD", "MAD", "MDL", "MGA",
    "MKD", "MMK", "MNT", "MOP", "MRU", "MUR", "MVR", "MWK", "MXN", "MXV", "MYR", "MZN", "NAD",
    "NGN", "NIO", "NOK", "NPR", "NZD", "OMR", "PAB", "PEN", "PGK", "PHP", "PKR", "PLN", "PYG",
    "QAR", "RON", "RSD", "RUB", "RWF", "SAR", "SBD", "SCR", "SDG", "SEK", "SGD", "SHP", "SLL",
    "SOS", "SRD", "SSP", "STN", "SVC", "SYP", "SZL", "THB", "TJS", "TMT", "TND", "TOP", "TRY",
    "TTD", "TWD", "TZS", "UAH", "UGX", "USD", "USN", "UYI", "UYU", "UYW", "UZS", "VES", "VND",
    "VUV", "WST", "XAF", "XCD", "XDR", "XOF", "XPF", "XSU", "XUA", "YER", "ZAR", "ZMW", "ZWL",
];

/// Requires an ISO 4217 currency code, in any letter case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyValidator {
    message: Template,
}

impl CurrencyValidator {
    const MESSAGE: &'static str = "'{value}' is not a valid currency code.";

    /// Creates the validator with the default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: Template::builtin(Self::MESSAGE),
        }
    }

    /// Replaces the failure message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Template::custom(message);
        self
    }
}

impl Default for CurrencyValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for CurrencyValidator {
    fn name(&self) -> &'static str {
        "currency"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        let valid = match value {
            Value::Null => true,
            Value::String(code) => CURRENCIES
                .binary_search(&code.to_ascii_uppercase().as_str())
                .is_ok(),
            _ => false,
        };
        if valid {
            Ok(())
        } else {
            Err(self.message.fail(self.name(), Some(value), ""))
        }
    }
}

/// Requires a value to be one of a fixed set.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValidator {
    allowed: Vec<Value>,
    message: Template,
}

impl EnumValidator {
    const MESSAGE: &'static str = "'{value}' is not in list '{condition}'";

    /// Creates the validator from the allowed values.
    pub fn new<I, V>(allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            message: Template::builtin(Self::MESSAGE),
        }
    }

    /// Replaces the failure message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Template::custom(message);
        self
    }

    fn condition(&self) -> String {
        let items: Vec<String> = self.allowed.iter().map(display_value).collect();
        format!("[{}]", items.join(", "))
    }
}

impl Validator for EnumValidator {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        if value.is_null() || self.allowed.iter().any(|allowed| same_value(allowed, value)) {
            Ok(())
        } else {
            Err(self.message.fail(self.name(), Some(value), &self.condition()))
        }
    }
}

/// Equality where numbers compare by value, so `1` equals `1.0`.
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}
