// SPDX-License-Identifier: MIT OR Apache-2.0

//! Borrowed view of a single value inside a configuration document.
//!
//! Documents keep their JSON types, so the coercions here are lenient: a number
//! can be read as a string, a string can be read as an integer, and anything that
//! cannot be coerced collapses to the zero value of the requested type. Only
//! [`ConfigValue::decode`] reports failures.

use crate::domain::errors::{ConfigError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// A value located in a [`ConfigDocument`](crate::domain::ConfigDocument).
///
/// # Examples
///
/// ```
/// use layercfg::domain::ConfigValue;
/// use serde_json::json;
///
/// let raw = json!("42");
/// let value = ConfigValue::new(&raw);
/// assert_eq!(value.as_i64(), 42);
/// assert_eq!(value.as_string(), "42");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfigValue<'a>(&'a Value);

impl<'a> ConfigValue<'a> {
    /// Wraps a JSON value.
    pub fn new(raw: &'a Value) -> Self {
        ConfigValue(raw)
    }

    /// Returns the underlying JSON value.
    pub fn raw(&self) -> &'a Value {
        self.0
    }

    /// Returns true when the value is a JSON array.
    pub fn is_array(&self) -> bool {
        self.0.is_array()
    }

    /// Renders the value as a string.
    ///
    /// Strings are returned as-is, numbers and booleans as their JSON text,
    /// `null` as the empty string, and objects or arrays as compact JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use layercfg::domain::ConfigValue;
    /// use serde_json::json;
    ///
    /// assert_eq!(ConfigValue::new(&json!(8080)).as_string(), "8080");
    /// assert_eq!(ConfigValue::new(&json!(null)).as_string(), "");
    /// assert_eq!(ConfigValue::new(&json!({"a": 1})).as_string(), r#"{"a":1}"#);
    /// ```
    pub fn as_string(&self) -> String {
        match self.0 {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => other.to_string(),
        }
    }

    /// Coerces the value to a boolean.
    ///
    /// Numbers are true when non-zero. Strings accept `1 t T TRUE true True`
    /// and `0 f F FALSE false False`; any other string is false.
    pub fn as_bool(&self) -> bool {
        match self.0 {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            Value::String(s) => parse_bool_literal(s).unwrap_or(false),
            _ => false,
        }
    }

    /// Coerces the value to an `i64`.
    ///
    /// Floating point values are truncated toward zero and saturate at the
    /// bounds of `i64`. Strings are parsed as integers first, then as floats.
    /// `true` is 1; everything else that cannot be coerced is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use layercfg::domain::ConfigValue;
    /// use serde_json::json;
    ///
    /// assert_eq!(ConfigValue::new(&json!(3.9)).as_i64(), 3);
    /// assert_eq!(ConfigValue::new(&json!("-12")).as_i64(), -12);
    /// assert_eq!(ConfigValue::new(&json!("abc")).as_i64(), 0);
    /// assert_eq!(ConfigValue::new(&json!(true)).as_i64(), 1);
    /// ```
    pub fn as_i64(&self) -> i64 {
        match self.0 {
            Value::Bool(true) => 1,
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
                .or_else(|| n.as_f64().map(truncate_f64))
                .unwrap_or(0),
            Value::String(s) => parse_i64_lenient(s.trim()),
            _ => 0,
        }
    }

    /// Returns the elements when the value is an array.
    pub fn elements(&self) -> Option<impl Iterator<Item = ConfigValue<'a>>> {
        self.0
            .as_array()
            .map(|items| items.iter().map(ConfigValue::new))
    }

    /// Decodes the value into any deserializable type.
    ///
    /// `key` is only used to describe the failure.
    pub fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        T::deserialize(self.0).map_err(|source| ConfigError::DecodeError {
            key: key.to_string(),
            target_type: std::any::type_name::<T>().to_string(),
            source,
        })
    }
}

impl fmt::Display for ConfigValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

fn parse_bool_literal(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_i64_lenient(s: &str) -> i64 {
    if let Ok(n) = s.parse::<i64>() {
        return n;
    }
    s.parse::<f64>().map(truncate_f64).unwrap_or(0)
}

// `as` saturates at the i64 bounds and maps NaN to 0.
fn truncate_f64(f: f64) -> i64 {
    f.trunc() as i64
}
