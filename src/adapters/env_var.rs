// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable override layer.
//!
//! Any single lookup can be overridden from the environment by setting a
//! variable whose name is exactly the dotted key path, e.g. `server.port=9090`.
//! Variables are read at lookup time, never cached, so changes made by the host
//! process are visible immediately.

use crate::domain::ConfigKey;
use std::collections::HashMap;
use std::env;

/// Reads per-key overrides from environment variables.
///
/// Empty variables count as unset.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::EnvVarAdapter;
/// use layercfg::domain::ConfigKey;
/// use std::collections::HashMap;
///
/// // Read the process environment
/// let adapter = EnvVarAdapter::new();
///
/// // Or a fixed set of values
/// let mut values = HashMap::new();
/// values.insert("server.port".to_string(), "9090".to_string());
/// let adapter = EnvVarAdapter::with_values(values);
/// assert_eq!(adapter.get(&ConfigKey::from("server.port")), Some("9090".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvVarAdapter {
    /// Fixed values replacing the process environment, if any
    values: Option<HashMap<String, String>>,
}

impl EnvVarAdapter {
    /// Creates an adapter that reads the process environment.
    pub fn new() -> Self {
        Self { values: None }
    }

    /// Creates an adapter with pre-populated values.
    ///
    /// **Note**: This method is primarily intended for testing and for hosts
    /// that want to isolate the resolver from the process environment. The
    /// process environment is not consulted at all.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            values: Some(values),
        }
    }

    /// Returns the non-empty value of the variable named exactly `key`.
    pub fn get(&self, key: &ConfigKey) -> Option<String> {
        if key.is_empty() {
            return None;
        }

        let value = match &self.values {
            Some(values) => values.get(key.as_str()).cloned(),
            // Names containing `=` or NUL are not valid variable names.
            None if key.as_str().contains(['=', '\0']) => None,
            None => env::var(key.as_str()).ok(),
        }?;

        if value.is_empty() {
            return None;
        }
        Some(value)
    }

    /// Returns the non-empty value of the variable named `name`.
    pub fn get_str(&self, name: &str) -> Option<String> {
        self.get(&ConfigKey::from(name))
    }
}
