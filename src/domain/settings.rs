// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote provider settings read from the bootstrap document.
//!
//! The bootstrap document declares a remote configuration provider under the
//! `nacos` key:
//!
//! ```json
//! {
//!   "nacos": {
//!     "serverConfigs": [{ "ipAddr": "10.0.0.5", "contextPath": "/nacos", "port": 8848 }],
//!     "dataId": "orders.json",
//!     "group": "DEFAULT_GROUP",
//!     "namespaceId": "prod"
//!   }
//! }
//! ```

use crate::domain::{ConfigDocument, ConfigKey, ConfigValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Key holding the provider server list.
pub const SERVER_CONFIGS_KEY: &str = "nacos.serverConfigs";
/// Key holding the remote data identifier.
pub const DATA_ID_KEY: &str = "nacos.dataId";
/// Key holding the remote group.
pub const GROUP_KEY: &str = "nacos.group";
/// Key holding the provider namespace.
pub const NAMESPACE_ID_KEY: &str = "nacos.namespaceId";

/// One provider server endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// Host name or IP address
    pub ip_addr: String,
    /// HTTP context path, e.g. `/nacos`
    pub context_path: String,
    /// TCP port
    pub port: u64,
}

/// Fixed client options handed to the provider factory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientOptions {
    /// Request timeout
    pub timeout: Duration,
    /// Interval between listen (long-poll) rounds
    pub listen_interval: Duration,
    /// Heartbeat interval
    pub beat_interval: Duration,
    /// Provider namespace
    pub namespace_id: String,
    /// Worker threads used by the client to refresh its cache
    pub update_thread_num: usize,
    /// Skip the on-disk client cache at start
    pub not_load_cache_at_start: bool,
    /// Update the client cache even when the fetched value is empty
    pub update_cache_when_empty: bool,
}

impl ClientOptions {
    /// Options used for the configuration client.
    pub fn for_config(namespace_id: impl Into<String>) -> Self {
        Self {
            timeout: Duration::from_millis(60_000),
            listen_interval: Duration::from_millis(30_000),
            beat_interval: Duration::from_millis(30_000),
            namespace_id: namespace_id.into(),
            update_thread_num: 2,
            not_load_cache_at_start: true,
            update_cache_when_empty: true,
        }
    }

    /// Options used by the service discovery client.
    ///
    /// These are independent of [`ClientOptions::for_config`].
    pub fn for_naming(namespace_id: impl Into<String>) -> Self {
        Self {
            timeout: Duration::from_millis(10_000),
            listen_interval: Duration::from_millis(15_000),
            beat_interval: Duration::from_millis(15_000),
            namespace_id: namespace_id.into(),
            update_thread_num: 20,
            not_load_cache_at_start: true,
            update_cache_when_empty: true,
        }
    }
}

/// Everything needed to build a provider client and subscribe to one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Provider endpoints
    pub server_configs: Vec<ServerConfig>,
    /// Remote data identifier
    pub data_id: String,
    /// Remote group, possibly empty
    pub group: String,
    /// Client options
    pub client: ClientOptions,
}

impl ProviderSettings {
    /// Reads provider settings from the bootstrap document.
    ///
    /// Returns `None` unless the document holds a non-empty server list and a
    /// non-empty data identifier. Malformed server entries keep whatever
    /// fields could be read.
    pub fn from_document(doc: &ConfigDocument) -> Option<Self> {
        let servers = doc.get_array(&ConfigKey::from(SERVER_CONFIGS_KEY))?;
        let server_configs: Vec<ServerConfig> = servers
            .elements()?
            .map(|entry| ServerConfig {
                ip_addr: field(entry, "ipAddr").map(|v| v.as_string()).unwrap_or_default(),
                context_path: field(entry, "contextPath")
                    .map(|v| v.as_string())
                    .unwrap_or_default(),
                port: field(entry, "port")
                    .and_then(|v| u64::try_from(v.as_i64()).ok())
                    .unwrap_or(0),
            })
            .collect();
        if server_configs.is_empty() {
            return None;
        }

        let data_id = doc.get_string(&ConfigKey::from(DATA_ID_KEY))?;
        if data_id.is_empty() {
            return None;
        }

        let group = doc
            .get_string(&ConfigKey::from(GROUP_KEY))
            .unwrap_or_default();
        let namespace_id = doc
            .get_string(&ConfigKey::from(NAMESPACE_ID_KEY))
            .unwrap_or_default();

        Some(Self {
            server_configs,
            data_id,
            group,
            client: ClientOptions::for_config(namespace_id),
        })
    }
}

fn field<'a>(entry: ConfigValue<'a>, name: &str) -> Option<ConfigValue<'a>> {
    entry.raw().get(name).map(ConfigValue::new)
}
