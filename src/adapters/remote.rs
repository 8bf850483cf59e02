// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote provider document layer.
//!
//! The remote document is fetched once at startup and then replaced wholesale
//! every time the provider pushes a change. Readers take an `Arc` snapshot per
//! lookup, so a lookup never observes a half-built document.

use crate::adapters::JsonParser;
use crate::domain::{ConfigDocument, ConfigError, ProviderSettings, Result};
use crate::ports::{
    ChangeCallback, ConfigChange, ConfigParam, ConfigParser, ConfigProvider, ConfigSource,
};
use arc_swap::ArcSwap;
use std::fmt;
use std::sync::Arc;

/// Configuration source backed by a push-capable remote provider.
///
/// # Priority
///
/// The remote document has a priority of 2 and overrides the local file.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::RemoteConfigAdapter;
/// use layercfg::domain::{ClientOptions, ConfigKey, ProviderSettings, Result, ServerConfig};
/// use layercfg::ports::{ChangeCallback, ConfigParam, ConfigProvider, ConfigSource};
/// use std::sync::Arc;
///
/// struct Static;
///
/// impl ConfigProvider for Static {
///     fn get_config(&self, _param: &ConfigParam) -> Result<String> {
///         Ok(r#"{"feature": {"enabled": true}}"#.to_string())
///     }
///     fn listen_config(&self, _param: &ConfigParam, _callback: ChangeCallback) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let settings = ProviderSettings {
///     server_configs: vec![ServerConfig {
///         ip_addr: "127.0.0.1".to_string(),
///         context_path: "/nacos".to_string(),
///         port: 8848,
///     }],
///     data_id: "app.json".to_string(),
///     group: "DEFAULT_GROUP".to_string(),
///     client: ClientOptions::for_config(""),
/// };
///
/// let adapter = RemoteConfigAdapter::connect(Arc::new(Static), &settings).unwrap();
/// assert_eq!(adapter.document().get_bool(&ConfigKey::from("feature.enabled")), Some(true));
/// ```
pub struct RemoteConfigAdapter {
    /// Raw provider client
    provider: Arc<dyn ConfigProvider>,
    /// The subscribed document
    param: ConfigParam,
    /// Current snapshot, shared with the change callback
    document: Arc<ArcSwap<ConfigDocument>>,
}

impl RemoteConfigAdapter {
    /// Fetches the initial document and subscribes to changes.
    ///
    /// A failed fetch is returned as [`ConfigError::ProviderError`]. A failed
    /// subscription is logged and the adapter keeps serving the fetched
    /// document. An unparsable payload is not an error; it yields an empty
    /// document.
    pub fn connect(provider: Arc<dyn ConfigProvider>, settings: &ProviderSettings) -> Result<Self> {
        let param = ConfigParam::from(settings);

        let payload = provider
            .get_config(&param)
            .map_err(|e| ConfigError::provider(format!("Failed to fetch {}", param), e))?;

        let document = Arc::new(ArcSwap::from_pointee(JsonParser::new().parse_or_empty(&payload)));

        let callback: ChangeCallback = {
            let document = Arc::clone(&document);
            Arc::new(move |change: ConfigChange| {
                tracing::debug!(
                    "Remote configuration {}@{} changed ({} bytes)",
                    change.data_id,
                    change.group,
                    change.data.len()
                );
                document.store(Arc::new(JsonParser::new().parse_or_empty(&change.data)));
            })
        };

        match provider.listen_config(&param, callback) {
            Ok(()) => tracing::info!(
                "Remote configuration {} subscribed on {} server(s)",
                param,
                settings.server_configs.len()
            ),
            Err(e) => tracing::warn!(
                "Failed to subscribe to {}, changes will not be pushed: {}",
                param,
                e
            ),
        }

        Ok(Self {
            provider,
            param,
            document,
        })
    }

    /// Replaces the remote document with `payload`.
    ///
    /// This is the same path a pushed change takes. An unparsable payload
    /// replaces the document with an empty one.
    pub fn apply_payload(&self, payload: &str) {
        self.document
            .store(Arc::new(JsonParser::new().parse_or_empty(payload)));
    }

    /// Returns the raw provider client.
    pub fn provider(&self) -> Arc<dyn ConfigProvider> {
        Arc::clone(&self.provider)
    }

    /// Returns the subscribed `(data_id, group)`.
    pub fn param(&self) -> &ConfigParam {
        &self.param
    }
}

impl fmt::Debug for RemoteConfigAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfigAdapter")
            .field("param", &self.param)
            .field("document", &self.document.load_full())
            .finish_non_exhaustive()
    }
}

impl ConfigSource for RemoteConfigAdapter {
    fn name(&self) -> &str {
        "remote"
    }

    fn priority(&self) -> u8 {
        2
    }

    fn document(&self) -> Arc<ConfigDocument> {
        self.document.load_full()
    }

    fn reload(&self) -> Result<()> {
        let payload = self
            .provider
            .get_config(&self.param)
            .map_err(|e| ConfigError::provider(format!("Failed to fetch {}", self.param), e))?;
        self.apply_payload(&payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClientOptions, ConfigKey, ServerConfig};
    use std::sync::Mutex;

    struct PushProvider {
        payload: Mutex<String>,
        callback: Mutex<Option<ChangeCallback>>,
        fail_fetch: bool,
        fail_listen: bool,
    }

    impl PushProvider {
        fn new(payload: &str) -> Self {
            Self {
                payload: Mutex::new(payload.to_string()),
                callback: Mutex::new(None),
                fail_fetch: false,
                fail_listen: false,
            }
        }

        fn push(&self, data: &str) {
            let callback = self.callback.lock().unwrap().clone().unwrap();
            callback(ConfigChange {
                namespace: String::new(),
                group: "DEFAULT_GROUP".to_string(),
                data_id: "app.json".to_string(),
                data: data.to_string(),
            });
        }
    }

    impl ConfigProvider for PushProvider {
        fn get_config(&self, _param: &ConfigParam) -> Result<String> {
            if self.fail_fetch {
                return Err(ConfigError::ProviderError {
                    message: "server unreachable".to_string(),
                    source: None,
                });
            }
            Ok(self.payload.lock().unwrap().clone())
        }

        fn listen_config(&self, _param: &ConfigParam, callback: ChangeCallback) -> Result<()> {
            if self.fail_listen {
                return Err(ConfigError::ProviderError {
                    message: "listen failed".to_string(),
                    source: None,
                });
            }
            *self.callback.lock().unwrap() = Some(callback);
            Ok(())
        }
    }

    fn settings() -> ProviderSettings {
        ProviderSettings {
            server_configs: vec![ServerConfig {
                ip_addr: "10.0.0.1".to_string(),
                context_path: "/nacos".to_string(),
                port: 8848,
            }],
            data_id: "app.json".to_string(),
            group: "DEFAULT_GROUP".to_string(),
            client: ClientOptions::for_config("public"),
        }
    }

    #[test]
    fn test_connect_fetches_initial_document() {
        let provider = Arc::new(PushProvider::new(r#"{"x": "1"}"#));
        let adapter = RemoteConfigAdapter::connect(provider, &settings()).unwrap();

        assert_eq!(adapter.name(), "remote");
        assert_eq!(adapter.priority(), 2);
        assert_eq!(adapter.param(), &ConfigParam::new("app.json", "DEFAULT_GROUP"));
        assert_eq!(
            adapter.document().get_string(&ConfigKey::from("x")),
            Some("1".to_string())
        );
    }

    #[test]
    fn test_connect_fetch_failure_is_provider_error() {
        let mut provider = PushProvider::new("{}");
        provider.fail_fetch = true;

        let result = RemoteConfigAdapter::connect(Arc::new(provider), &settings());
        assert!(matches!(result, Err(ConfigError::ProviderError { .. })));
    }

    #[test]
    fn test_subscription_failure_keeps_fetched_document() {
        let mut provider = PushProvider::new(r#"{"x": "1"}"#);
        provider.fail_listen = true;

        let adapter = RemoteConfigAdapter::connect(Arc::new(provider), &settings()).unwrap();
        assert_eq!(
            adapter.document().get_string(&ConfigKey::from("x")),
            Some("1".to_string())
        );
        assert!(adapter.provider().get_config(adapter.param()).is_ok());
    }

    #[test]
    fn test_unparsable_initial_payload_is_empty() {
        let provider = Arc::new(PushProvider::new("not json"));
        let adapter = RemoteConfigAdapter::connect(provider, &settings()).unwrap();
        assert!(adapter.document().is_empty());
    }

    #[test]
    fn test_push_replaces_document() {
        let provider = Arc::new(PushProvider::new(r#"{"x": "1"}"#));
        let adapter = RemoteConfigAdapter::connect(provider.clone(), &settings()).unwrap();

        let before = adapter.document();
        provider.push(r#"{"x": "2"}"#);

        assert_eq!(
            adapter.document().get_string(&ConfigKey::from("x")),
            Some("2".to_string())
        );
        // A snapshot taken earlier is untouched
        assert_eq!(before.get_string(&ConfigKey::from("x")), Some("1".to_string()));
    }

    #[test]
    fn test_apply_payload_and_reload() {
        let provider = Arc::new(PushProvider::new(r#"{"x": "1"}"#));
        let adapter = RemoteConfigAdapter::connect(provider.clone(), &settings()).unwrap();

        adapter.apply_payload(r#"{"x": "forced"}"#);
        assert_eq!(
            adapter.document().get_string(&ConfigKey::from("x")),
            Some("forced".to_string())
        );

        *provider.payload.lock().unwrap() = r#"{"x": "3"}"#.to_string();
        adapter.reload().unwrap();
        assert_eq!(
            adapter.document().get_string(&ConfigKey::from("x")),
            Some("3".to_string())
        );
    }
}
