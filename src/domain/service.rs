// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service trait definition.
//!
//! This module defines the `ConfigurationService` trait, the typed accessor API
//! consumers use to read configuration. Accessors never fail for missing keys:
//! absence degrades to the supplied default and then to the zero value of the
//! requested type. Only struct decoding reports an error.

use crate::domain::{ConfigValue, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The typed configuration accessor API.
///
/// # Examples
///
/// ```rust
/// use layercfg::domain::ConfigurationService;
/// use serde_json::Value;
///
/// struct Fixed;
///
/// impl ConfigurationService for Fixed {
///     fn get_string(&self, _key: &str, default: Option<&str>) -> String {
///         default.unwrap_or("").to_string()
///     }
///     fn get_bool(&self, _key: &str, default: Option<bool>) -> bool {
///         default.unwrap_or(false)
///     }
///     fn get_int64(&self, _key: &str, default: Option<i64>) -> i64 {
///         default.unwrap_or(0)
///     }
///     fn get_array_string(&self, _key: &str) -> Vec<String> {
///         Vec::new()
///     }
///     fn get_array_int64(&self, _key: &str) -> Vec<i64> {
///         Vec::new()
///     }
///     fn get_json(&self, _key: &str) -> Option<Value> {
///         None
///     }
/// }
///
/// let service = Fixed;
/// assert_eq!(service.get_string("app.name", Some("demo")), "demo");
/// assert_eq!(service.get_int("app.workers", None), 0);
/// ```
pub trait ConfigurationService: Send + Sync {
    /// Resolves `key` as a string, applying placeholder interpolation.
    ///
    /// Returns `default` (also interpolated) when no layer has the key, or the
    /// empty string when no default is given.
    fn get_string(&self, key: &str, default: Option<&str>) -> String;

    /// Resolves `key` as a boolean, `false` when absent and no default is given.
    fn get_bool(&self, key: &str, default: Option<bool>) -> bool;

    /// Resolves `key` as an `i64`, `0` when absent and no default is given.
    fn get_int64(&self, key: &str, default: Option<i64>) -> i64;

    /// Resolves `key` as a native integer.
    ///
    /// This is [`get_int64`](Self::get_int64) narrowed with `as`; values that do
    /// not fit wrap.
    fn get_int(&self, key: &str, default: Option<isize>) -> isize {
        self.get_int64(key, default.map(|d| d as i64)) as isize
    }

    /// Resolves `key` as an array of strings, empty when absent.
    fn get_array_string(&self, key: &str) -> Vec<String>;

    /// Resolves `key` as an array of `i64`, empty when absent.
    fn get_array_int64(&self, key: &str) -> Vec<i64>;

    /// Returns a copy of the raw JSON value at `key` from the first document
    /// layer that has it.
    fn get_json(&self, key: &str) -> Option<Value>;

    /// Decodes the value at `key` into `T`.
    ///
    /// Returns `Ok(None)` when no document layer has the key, and
    /// [`ConfigError::DecodeError`](crate::domain::ConfigError::DecodeError)
    /// when the value does not fit `T`.
    fn get_struct<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        match self.get_json(key) {
            Some(value) => ConfigValue::new(&value).decode(key).map(Some),
            None => Ok(None),
        }
    }
}
