// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory doubles for the provider and discovery clients.

#![allow(dead_code)]

use layercfg::adapters::EnvVarAdapter;
use layercfg::domain::{ConfigError, ProviderSettings, Result};
use layercfg::ports::{
    ChangeCallback, ConfigChange, ConfigParam, ConfigProvider, DeregisterInstanceParam, Instance,
    NamingClient, RegisterInstanceParam, SelectInstancesParam, SubscribeParam,
};
use layercfg::service::BootstrapOptions;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A provider serving one payload and delivering pushes on demand.
#[derive(Default)]
pub struct StaticProvider {
    payload: Mutex<String>,
    listeners: Mutex<Vec<(ConfigParam, ChangeCallback)>>,
    fetches: AtomicUsize,
    fail_fetch: bool,
    fail_listen: bool,
}

impl StaticProvider {
    /// Creates a provider serving `payload`.
    pub fn new(payload: &str) -> Self {
        Self {
            payload: Mutex::new(payload.to_string()),
            ..Default::default()
        }
    }

    /// Creates a provider whose fetches always fail.
    pub fn failing_fetch() -> Self {
        Self {
            fail_fetch: true,
            ..Default::default()
        }
    }

    /// Creates a provider that rejects subscriptions.
    pub fn failing_listen(payload: &str) -> Self {
        Self {
            fail_listen: true,
            ..Self::new(payload)
        }
    }

    /// Replaces the payload returned by later fetches.
    pub fn set_payload(&self, payload: &str) {
        *self.payload.lock().unwrap() = payload.to_string();
    }

    /// Delivers `data` to every registered listener, like a server push.
    pub fn push(&self, data: &str) {
        let listeners: Vec<_> = self.listeners.lock().unwrap().clone();
        for (param, callback) in listeners {
            callback(ConfigChange {
                namespace: String::new(),
                group: param.group.clone(),
                data_id: param.data_id.clone(),
                data: data.to_string(),
            });
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    /// Parameters of the registered listeners.
    pub fn listened_params(&self) -> Vec<ConfigParam> {
        self.listeners
            .lock()
            .unwrap()
            .iter()
            .map(|(param, _)| param.clone())
            .collect()
    }

    /// Number of fetches served.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl ConfigProvider for StaticProvider {
    fn get_config(&self, _param: &ConfigParam) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch {
            return Err(ConfigError::ProviderError {
                message: "connection refused".to_string(),
                source: None,
            });
        }
        Ok(self.payload.lock().unwrap().clone())
    }

    fn listen_config(&self, param: &ConfigParam, callback: ChangeCallback) -> Result<()> {
        if self.fail_listen {
            return Err(ConfigError::ProviderError {
                message: "listen rejected".to_string(),
                source: None,
            });
        }
        self.listeners
            .lock()
            .unwrap()
            .push((param.clone(), callback));
        Ok(())
    }
}

/// Factory handing out one shared provider and recording the settings it got.
pub struct SharedFactory {
    pub provider: Arc<StaticProvider>,
    pub seen: Mutex<Vec<ProviderSettings>>,
}

impl SharedFactory {
    pub fn new(provider: Arc<StaticProvider>) -> Self {
        Self {
            provider,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl layercfg::ports::ProviderFactory for SharedFactory {
    fn create(&self, settings: &ProviderSettings) -> Result<Arc<dyn ConfigProvider>> {
        self.seen.lock().unwrap().push(settings.clone());
        Ok(self.provider.clone())
    }
}

/// A discovery client recording every call.
#[derive(Default)]
pub struct MockNamingClient {
    pub registered: Mutex<Vec<RegisterInstanceParam>>,
    pub deregistered: Mutex<Vec<DeregisterInstanceParam>>,
    pub subscriptions: Mutex<Vec<SubscribeParam>>,
    pub instances: Vec<Instance>,
}

impl MockNamingClient {
    /// Creates a client whose selections return `instances`.
    pub fn with_instances(instances: Vec<Instance>) -> Self {
        Self {
            instances,
            ..Default::default()
        }
    }

    /// Total number of calls that reached the client.
    pub fn call_count(&self) -> usize {
        self.registered.lock().unwrap().len()
            + self.deregistered.lock().unwrap().len()
            + self.subscriptions.lock().unwrap().len()
    }
}

impl NamingClient for MockNamingClient {
    fn register_instance(&self, param: RegisterInstanceParam) -> Result<bool> {
        self.registered.lock().unwrap().push(param);
        Ok(true)
    }

    fn deregister_instance(&self, param: DeregisterInstanceParam) -> Result<bool> {
        self.deregistered.lock().unwrap().push(param);
        Ok(true)
    }

    fn subscribe(&self, param: SubscribeParam) -> Result<()> {
        (param.callback)(Ok(self.instances.clone()));
        self.subscriptions.lock().unwrap().push(param);
        Ok(())
    }

    fn select_instances(&self, param: SelectInstancesParam) -> Result<Vec<Instance>> {
        Ok(self
            .instances
            .iter()
            .filter(|i| !param.healthy_only || i.healthy)
            .cloned()
            .collect())
    }

    fn select_all_instances(&self, _service_name: &str, _clusters: &[String]) -> Result<Vec<Instance>> {
        Ok(self.instances.clone())
    }
}

/// Writes a bootstrap file into `dir` and returns its path.
pub fn write_bootstrap(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("config.json");
    std::fs::write(&path, content).unwrap();
    path
}

/// Options isolated from the process: explicit path, fixed env, home in `dir`.
pub fn isolated_options(dir: &Path, config_file: &Path, env: &[(&str, &str)]) -> BootstrapOptions {
    let values: HashMap<String, String> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    BootstrapOptions::new()
        .args(vec![format!("--config={}", config_file.display())])
        .env(EnvVarAdapter::with_values(values))
        .home_dir(dir)
}

/// A bootstrap document pointing at one provider server.
pub fn bootstrap_with_provider(extra: &str) -> String {
    format!(
        r#"{{
            "nacos": {{
                "serverConfigs": [{{"ipAddr": "127.0.0.1", "contextPath": "/nacos", "port": 8848}}],
                "dataId": "orders.json",
                "group": "DEFAULT_GROUP",
                "namespaceId": "prod"
            }}{}
        }}"#,
        extra
    )
}
