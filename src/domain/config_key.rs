// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dotted key path newtype.
//!
//! A `ConfigKey` names a location inside a configuration document, for example
//! `server.port` or `nacos.serverConfigs.0.ipAddr`. The same string is also the
//! exact environment variable name consulted for string lookups.

use std::fmt;

/// A type-safe wrapper for dotted configuration key paths.
///
/// # Examples
///
/// ```
/// use layercfg::domain::ConfigKey;
///
/// let key = ConfigKey::from("database.host");
/// assert_eq!(key.as_str(), "database.host");
/// assert_eq!(key.segments().collect::<Vec<_>>(), vec!["database", "host"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Iterates over the `.`-separated segments of the path.
    ///
    /// An empty key yields a single empty segment, which never matches a
    /// document member.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Returns true when the key is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<&ConfigKey> for ConfigKey {
    fn from(key: &ConfigKey) -> Self {
        key.clone()
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
