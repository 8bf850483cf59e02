// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered resolution engine.
//!
//! This module provides [`LayeredConfig`], the implementation of the
//! `ConfigurationService` trait that answers every lookup from the
//! environment, the remote document and the local document, in that order.

use crate::adapters::{EnvVarAdapter, JsonFileAdapter};
use crate::domain::placeholder;
use crate::domain::{ConfigDocument, ConfigKey, ConfigValue, ConfigurationService};
use crate::ports::ConfigSource;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Priority of the local bootstrap document.
pub const LOCAL_PRIORITY: u8 = 1;

/// Priority of the remote provider document.
pub const REMOTE_PRIORITY: u8 = 2;

/// Resolves typed values across the environment and the document layers.
///
/// Precedence is environment variable (string lookups only) > remote document
/// > local document > caller default > zero value. Document layers are
/// queried in priority order, highest first; each lookup takes one snapshot
/// per layer, so a concurrent remote update is observed either completely or
/// not at all.
///
/// # Examples
///
/// ```rust
/// use layercfg::prelude::*;
/// use layercfg::service::LayeredConfig;
/// use serde_json::json;
///
/// let config = LayeredConfig::builder()
///     .with_document(ConfigDocument::from_value(json!({
///         "server": {"host": "localhost", "port": 8080},
///         "url": "http://${server.host}:${ server.port }/",
///     })))
///     .build();
///
/// assert_eq!(config.get_int64("server.port", None), 8080);
/// assert_eq!(config.get_string("url", None), "http://localhost:8080/");
/// assert_eq!(config.get_string("missing", Some("fallback")), "fallback");
/// ```
pub struct LayeredConfig {
    /// Per-key environment overrides
    env: EnvVarAdapter,
    /// Document layers, highest priority first
    sources: Vec<Arc<dyn ConfigSource>>,
}

impl LayeredConfig {
    /// Creates a resolver with no layers and an empty environment.
    pub fn new() -> Self {
        Self {
            env: EnvVarAdapter::with_values(HashMap::new()),
            sources: Vec::new(),
        }
    }

    /// Creates a new builder.
    pub fn builder() -> LayeredConfigBuilder {
        LayeredConfigBuilder::new()
    }

    /// Adds a document layer.
    ///
    /// Layers are kept sorted by priority; layers of equal priority keep
    /// insertion order.
    pub fn add_source(&mut self, source: Arc<dyn ConfigSource>) {
        self.sources.push(source);
        self.sources.sort_by_key(|s| std::cmp::Reverse(s.priority()));
    }

    /// Returns the current local document, empty when there is none.
    pub fn local_document(&self) -> Arc<ConfigDocument> {
        self.layer_document(LOCAL_PRIORITY)
            .unwrap_or_else(|| Arc::new(ConfigDocument::empty()))
    }

    /// Returns the current remote document, if a remote layer is present.
    pub fn remote_document(&self) -> Option<Arc<ConfigDocument>> {
        self.layer_document(REMOTE_PRIORITY)
    }

    /// Returns true when any document layer has a value at `key`.
    ///
    /// The environment is not consulted.
    pub fn contains(&self, key: &str) -> bool {
        let key = ConfigKey::from(key);
        self.snapshots().iter().any(|doc| doc.contains(&key))
    }

    /// Re-reads every layer that supports it.
    ///
    /// Failures are logged and do not stop the remaining layers.
    pub fn reload(&self) {
        for source in &self.sources {
            if let Err(e) = source.reload() {
                tracing::warn!("Failed to reload source '{}': {}", source.name(), e);
            }
        }
    }

    fn layer_document(&self, priority: u8) -> Option<Arc<ConfigDocument>> {
        self.sources
            .iter()
            .find(|s| s.priority() == priority)
            .map(|s| s.document())
    }

    /// One snapshot per layer, highest priority first.
    fn snapshots(&self) -> Vec<Arc<ConfigDocument>> {
        self.sources.iter().map(|s| s.document()).collect()
    }

    /// Env > documents, without interpolation.
    fn raw_string(&self, key: &ConfigKey) -> Option<String> {
        if let Some(value) = self.env.get(key) {
            return Some(value);
        }
        self.snapshots()
            .iter()
            .find_map(|doc| doc.get_string(key))
    }

    fn interpolate<'a>(&self, value: &'a str) -> Cow<'a, str> {
        placeholder::interpolate(value, |key| {
            self.raw_string(&ConfigKey::from(key)).unwrap_or_default()
        })
    }

    fn first_array<T>(&self, key: &str, convert: impl Fn(ConfigValue<'_>) -> T) -> Vec<T> {
        let key = ConfigKey::from(key);
        for doc in self.snapshots() {
            if let Some(items) = doc.get_array(&key).and_then(|array| array.elements()) {
                return items.map(&convert).collect();
            }
        }
        Vec::new()
    }
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayeredConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layers: Vec<_> = self
            .sources
            .iter()
            .map(|s| (s.name().to_string(), s.priority()))
            .collect();
        f.debug_struct("LayeredConfig")
            .field("env", &self.env)
            .field("layers", &layers)
            .finish()
    }
}

impl ConfigurationService for LayeredConfig {
    fn get_string(&self, key: &str, default: Option<&str>) -> String {
        let key = ConfigKey::from(key);
        match self.raw_string(&key) {
            Some(value) => self.interpolate(&value).into_owned(),
            None => default
                .map(|d| self.interpolate(d).into_owned())
                .unwrap_or_default(),
        }
    }

    fn get_bool(&self, key: &str, default: Option<bool>) -> bool {
        let key = ConfigKey::from(key);
        self.snapshots()
            .iter()
            .find_map(|doc| doc.get_bool(&key))
            .or(default)
            .unwrap_or(false)
    }

    fn get_int64(&self, key: &str, default: Option<i64>) -> i64 {
        let key = ConfigKey::from(key);
        self.snapshots()
            .iter()
            .find_map(|doc| doc.get_i64(&key))
            .or(default)
            .unwrap_or(0)
    }

    fn get_array_string(&self, key: &str) -> Vec<String> {
        self.first_array(key, |item| {
            self.interpolate(&item.as_string()).into_owned()
        })
    }

    fn get_array_int64(&self, key: &str) -> Vec<i64> {
        self.first_array(key, |item| item.as_i64())
    }

    fn get_json(&self, key: &str) -> Option<Value> {
        let key = ConfigKey::from(key);
        self.snapshots()
            .iter()
            .find_map(|doc| doc.lookup(&key).map(|v| v.raw().clone()))
    }
}

/// Builder for constructing a [`LayeredConfig`].
///
/// Without [`with_env_vars`](Self::with_env_vars) or
/// [`with_env_values`](Self::with_env_values) the environment layer is empty.
///
/// # Examples
///
/// ```rust
/// use layercfg::service::LayeredConfig;
/// use layercfg::prelude::*;
/// use std::collections::HashMap;
///
/// let mut env = HashMap::new();
/// env.insert("app.name".to_string(), "from-env".to_string());
///
/// let config = LayeredConfig::builder()
///     .with_env_values(env)
///     .with_json_file("/nonexistent/config.json")
///     .build();
///
/// assert_eq!(config.get_string("app.name", None), "from-env");
/// ```
pub struct LayeredConfigBuilder {
    env: EnvVarAdapter,
    sources: Vec<Arc<dyn ConfigSource>>,
}

impl LayeredConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            env: EnvVarAdapter::with_values(HashMap::new()),
            sources: Vec::new(),
        }
    }

    /// Reads per-key overrides from the process environment.
    pub fn with_env_vars(self) -> Self {
        self.with_env(EnvVarAdapter::new())
    }

    /// Reads per-key overrides from a fixed map instead of the process
    /// environment.
    pub fn with_env_values(self, values: HashMap<String, String>) -> Self {
        self.with_env(EnvVarAdapter::with_values(values))
    }

    /// Uses `env` for per-key overrides.
    pub fn with_env(mut self, env: EnvVarAdapter) -> Self {
        self.env = env;
        self
    }

    /// Adds a document layer.
    pub fn with_source(mut self, source: Arc<dyn ConfigSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds the JSON file at `path` as the local layer.
    ///
    /// A missing or unparsable file contributes an empty document.
    pub fn with_json_file(self, path: impl AsRef<Path>) -> Self {
        self.with_source(Arc::new(JsonFileAdapter::load_or_empty(path)))
    }

    /// Adds an in-memory document as the local layer.
    pub fn with_document(self, document: ConfigDocument) -> Self {
        self.with_source(Arc::new(JsonFileAdapter::from_document(
            "<memory>", document,
        )))
    }

    /// Builds the resolver.
    pub fn build(self) -> LayeredConfig {
        let mut config = LayeredConfig::new();
        config.env = self.env;
        for source in self.sources {
            config.add_source(source);
        }
        config
    }
}

impl Default for LayeredConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
