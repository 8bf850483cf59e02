// SPDX-License-Identifier: MIT OR Apache-2.0

//! Immutable structured configuration document.
//!
//! A `ConfigDocument` is a parsed JSON tree probed by dotted key path. Lookups
//! return an explicit `Option` so callers can tell "absent" from "present but
//! empty" and fall through to the next layer.

use crate::domain::{ConfigKey, ConfigValue};
use serde_json::{Map, Value};

/// A parsed configuration document.
///
/// Object members are addressed by name; a segment made of digits addresses an
/// array element by index.
///
/// # Examples
///
/// ```
/// use layercfg::domain::{ConfigDocument, ConfigKey};
/// use serde_json::json;
///
/// let doc = ConfigDocument::from_value(json!({
///     "server": { "port": 8080, "hosts": ["a", "b"] }
/// }));
///
/// let port = doc.lookup(&ConfigKey::from("server.port")).unwrap();
/// assert_eq!(port.as_i64(), 8080);
///
/// let second = doc.lookup(&ConfigKey::from("server.hosts.1")).unwrap();
/// assert_eq!(second.as_string(), "b");
///
/// assert!(doc.lookup(&ConfigKey::from("server.missing")).is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigDocument {
    root: Value,
}

impl ConfigDocument {
    /// Creates an empty document, equivalent to `{}`.
    pub fn empty() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Creates a document from an already parsed JSON value.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Returns the root of the document.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Returns true when the document has no members.
    pub fn is_empty(&self) -> bool {
        match &self.root {
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Null => true,
            _ => false,
        }
    }

    /// Locates the value at `key`, if any.
    pub fn lookup(&self, key: &ConfigKey) -> Option<ConfigValue<'_>> {
        if key.is_empty() {
            return None;
        }
        let mut current = &self.root;
        for segment in key.segments() {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(ConfigValue::new(current))
    }

    /// Returns true when a value exists at `key`.
    pub fn contains(&self, key: &ConfigKey) -> bool {
        self.lookup(key).is_some()
    }

    /// Returns the value at `key` rendered as a string.
    pub fn get_string(&self, key: &ConfigKey) -> Option<String> {
        self.lookup(key).map(|v| v.as_string())
    }

    /// Returns the value at `key` coerced to a boolean.
    pub fn get_bool(&self, key: &ConfigKey) -> Option<bool> {
        self.lookup(key).map(|v| v.as_bool())
    }

    /// Returns the value at `key` coerced to an `i64`.
    pub fn get_i64(&self, key: &ConfigKey) -> Option<i64> {
        self.lookup(key).map(|v| v.as_i64())
    }

    /// Returns the value at `key` only when it is an array.
    pub fn get_array(&self, key: &ConfigKey) -> Option<ConfigValue<'_>> {
        self.lookup(key).filter(|v| v.is_array())
    }
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for ConfigDocument {
    fn from(root: Value) -> Self {
        Self::from_value(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ConfigDocument {
        ConfigDocument::from_value(json!({
            "nacos": {
                "dataId": "app.json",
                "serverConfigs": [
                    { "ipAddr": "10.0.0.1", "contextPath": "/nacos", "port": 8848 }
                ]
            },
            "flag": true,
            "empty": "",
            "nothing": null
        }))
    }

    #[test]
    fn test_empty_document() {
        let doc = ConfigDocument::empty();
        assert!(doc.is_empty());
        assert_eq!(doc.as_value(), &json!({}));
        assert!(doc.lookup(&ConfigKey::from("any.key")).is_none());
    }

    #[test]
    fn test_default_is_empty_object() {
        assert_eq!(ConfigDocument::default(), ConfigDocument::empty());
    }

    #[test]
    fn test_nested_lookup() {
        let doc = sample();
        assert_eq!(
            doc.get_string(&ConfigKey::from("nacos.dataId")),
            Some("app.json".to_string())
        );
    }

    #[test]
    fn test_array_index_lookup() {
        let doc = sample();
        assert_eq!(
            doc.get_i64(&ConfigKey::from("nacos.serverConfigs.0.port")),
            Some(8848)
        );
        assert!(doc
            .lookup(&ConfigKey::from("nacos.serverConfigs.1.port"))
            .is_none());
        assert!(doc
            .lookup(&ConfigKey::from("nacos.serverConfigs.x"))
            .is_none());
    }

    #[test]
    fn test_present_but_empty_values() {
        let doc = sample();
        assert!(doc.contains(&ConfigKey::from("empty")));
        assert!(doc.contains(&ConfigKey::from("nothing")));
        assert_eq!(doc.get_string(&ConfigKey::from("nothing")), Some(String::new()));
    }

    #[test]
    fn test_lookup_through_scalar_fails() {
        let doc = sample();
        assert!(doc.lookup(&ConfigKey::from("flag.inner")).is_none());
    }

    #[test]
    fn test_empty_key_never_matches() {
        let doc = ConfigDocument::from_value(json!({"": "blank"}));
        assert!(doc.lookup(&ConfigKey::from("")).is_none());
    }

    #[test]
    fn test_get_array_filters_scalars() {
        let doc = sample();
        assert!(doc.get_array(&ConfigKey::from("nacos.serverConfigs")).is_some());
        assert!(doc.get_array(&ConfigKey::from("nacos.dataId")).is_none());
    }

    #[test]
    fn test_get_bool() {
        let doc = sample();
        assert_eq!(doc.get_bool(&ConfigKey::from("flag")), Some(true));
        assert_eq!(doc.get_bool(&ConfigKey::from("missing")), None);
    }
}
