// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote configuration provider port.
//!
//! The provider is an external, push-capable configuration service. The crate
//! only needs two operations from it: fetch the current payload of one
//! document, and subscribe to changes of that document. Connection handling,
//! retries and long polling are the client's own business.

use crate::domain::{ProviderSettings, Result};
use std::fmt;
use std::sync::Arc;

/// Identifies one remote document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConfigParam {
    /// Remote data identifier
    pub data_id: String,
    /// Remote group
    pub group: String,
}

impl ConfigParam {
    /// Creates a parameter for `(data_id, group)`.
    pub fn new(data_id: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            data_id: data_id.into(),
            group: group.into(),
        }
    }
}

impl From<&ProviderSettings> for ConfigParam {
    fn from(settings: &ProviderSettings) -> Self {
        Self::new(settings.data_id.clone(), settings.group.clone())
    }
}

impl fmt::Display for ConfigParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.data_id, self.group)
    }
}

/// A change notification delivered by the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigChange {
    /// Namespace of the changed document
    pub namespace: String,
    /// Group of the changed document
    pub group: String,
    /// Data identifier of the changed document
    pub data_id: String,
    /// The new payload
    pub data: String,
}

/// Callback invoked by the provider on its own thread for every change.
///
/// Callbacks should return quickly; the provider may deliver further
/// notifications only after the callback returns.
pub type ChangeCallback = Arc<dyn Fn(ConfigChange) + Send + Sync>;

/// A push-capable remote configuration client.
///
/// # Examples
///
/// ```rust
/// use layercfg::domain::Result;
/// use layercfg::ports::{ChangeCallback, ConfigParam, ConfigProvider};
///
/// struct Static;
///
/// impl ConfigProvider for Static {
///     fn get_config(&self, _param: &ConfigParam) -> Result<String> {
///         Ok(r#"{"feature": {"enabled": true}}"#.to_string())
///     }
///
///     fn listen_config(&self, _param: &ConfigParam, _callback: ChangeCallback) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let payload = Static.get_config(&ConfigParam::new("app.json", "DEFAULT_GROUP")).unwrap();
/// assert!(payload.contains("enabled"));
/// ```
pub trait ConfigProvider: Send + Sync {
    /// Fetches the current payload of the document named by `param`.
    fn get_config(&self, param: &ConfigParam) -> Result<String>;

    /// Registers `callback` for changes of the document named by `param`.
    ///
    /// The registration lasts for the life of the client.
    fn listen_config(&self, param: &ConfigParam, callback: ChangeCallback) -> Result<()>;
}

/// Builds a provider client from the bootstrap settings.
///
/// A failure here is a fatal bootstrap fault for
/// [`ConfigContext`](crate::service::ConfigContext).
pub trait ProviderFactory {
    /// Creates a client connected to `settings.server_configs`.
    fn create(&self, settings: &ProviderSettings) -> Result<Arc<dyn ConfigProvider>>;
}

impl<F> ProviderFactory for F
where
    F: Fn(&ProviderSettings) -> Result<Arc<dyn ConfigProvider>>,
{
    fn create(&self, settings: &ProviderSettings) -> Result<Arc<dyn ConfigProvider>> {
        self(settings)
    }
}
