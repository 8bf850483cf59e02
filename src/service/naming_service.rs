// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argument-checking front for the service discovery client.

use crate::domain::settings::NAMESPACE_ID_KEY;
use crate::domain::{ClientOptions, ConfigDocument, ConfigError, ConfigKey, Result};
use crate::ports::{
    DeregisterInstanceParam, Instance, NamingClient, RegisterInstanceParam, SelectInstancesParam,
    SubscribeCallback, SubscribeParam,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Weight given to every instance this process registers.
pub const DEFAULT_INSTANCE_WEIGHT: f64 = 10.0;

/// Validates discovery calls and forwards them to a [`NamingClient`].
///
/// Invalid arguments are rejected with [`ConfigError::ValidationError`]
/// before the client is called.
///
/// # Examples
///
/// ```rust
/// use layercfg::domain::{ConfigError, Result};
/// use layercfg::ports::{
///     DeregisterInstanceParam, Instance, NamingClient, RegisterInstanceParam,
///     SelectInstancesParam, SubscribeParam,
/// };
/// use layercfg::service::NamingService;
/// use std::collections::HashMap;
/// use std::sync::Arc;
///
/// struct AcceptAll;
///
/// impl NamingClient for AcceptAll {
///     fn register_instance(&self, _p: RegisterInstanceParam) -> Result<bool> { Ok(true) }
///     fn deregister_instance(&self, _p: DeregisterInstanceParam) -> Result<bool> { Ok(true) }
///     fn subscribe(&self, _p: SubscribeParam) -> Result<()> { Ok(()) }
///     fn select_instances(&self, _p: SelectInstancesParam) -> Result<Vec<Instance>> { Ok(vec![]) }
///     fn select_all_instances(&self, _s: &str, _c: &[String]) -> Result<Vec<Instance>> { Ok(vec![]) }
/// }
///
/// let naming = NamingService::new(Arc::new(AcceptAll));
/// assert!(naming.register_instance("10.0.0.7", 8080, "orders", "", HashMap::new()).unwrap());
///
/// let err = naming.register_instance("10.0.0.7", 0, "orders", "", HashMap::new()).unwrap_err();
/// assert!(matches!(err, ConfigError::ValidationError { .. }));
/// ```
#[derive(Clone)]
pub struct NamingService {
    client: Arc<dyn NamingClient>,
}

impl NamingService {
    /// Wraps `client`.
    pub fn new(client: Arc<dyn NamingClient>) -> Self {
        Self { client }
    }

    /// Client options for building a discovery client from the bootstrap
    /// document.
    pub fn client_options(bootstrap: &ConfigDocument) -> ClientOptions {
        let namespace_id = bootstrap
            .get_string(&ConfigKey::from(NAMESPACE_ID_KEY))
            .unwrap_or_default();
        ClientOptions::for_naming(namespace_id)
    }

    /// Registers an ephemeral, enabled, healthy instance with weight 10.
    pub fn register_instance(
        &self,
        ip: &str,
        port: u64,
        service_name: &str,
        cluster_name: &str,
        metadata: HashMap<String, String>,
    ) -> Result<bool> {
        check_instance(ip, port, service_name)?;
        self.client.register_instance(RegisterInstanceParam {
            ip: ip.to_string(),
            port,
            service_name: service_name.to_string(),
            cluster_name: cluster_name.to_string(),
            metadata,
            weight: DEFAULT_INSTANCE_WEIGHT,
            enable: true,
            healthy: true,
            ephemeral: true,
        })
    }

    /// Deregisters an instance.
    pub fn deregister_instance(
        &self,
        ip: &str,
        port: u64,
        service_name: &str,
        cluster_name: &str,
    ) -> Result<bool> {
        check_instance(ip, port, service_name)?;
        self.client.deregister_instance(DeregisterInstanceParam {
            ip: ip.to_string(),
            port,
            service_name: service_name.to_string(),
            cluster: cluster_name.to_string(),
            ephemeral: false,
        })
    }

    /// Subscribes `callback` to instance changes of a service.
    pub fn subscribe(
        &self,
        service_name: &str,
        clusters: &[String],
        callback: SubscribeCallback,
    ) -> Result<()> {
        check_service(service_name, clusters)?;
        self.client.subscribe(SubscribeParam {
            service_name: service_name.to_string(),
            clusters: clusters.to_vec(),
            callback,
        })
    }

    /// Lists instances of a service.
    pub fn select_instances(
        &self,
        service_name: &str,
        clusters: &[String],
        healthy_only: bool,
    ) -> Result<Vec<Instance>> {
        check_service(service_name, clusters)?;
        self.client.select_instances(SelectInstancesParam {
            service_name: service_name.to_string(),
            clusters: clusters.to_vec(),
            healthy_only,
        })
    }

    /// Lists all instances of a service regardless of health.
    pub fn select_all_instances(
        &self,
        service_name: &str,
        clusters: &[String],
    ) -> Result<Vec<Instance>> {
        check_service(service_name, clusters)?;
        self.client.select_all_instances(service_name, clusters)
    }
}

impl std::fmt::Debug for NamingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamingService").finish_non_exhaustive()
    }
}

fn check_instance(ip: &str, port: u64, service_name: &str) -> Result<()> {
    if ip.is_empty() {
        return Err(ConfigError::invalid("ip must not be empty"));
    }
    if port == 0 {
        return Err(ConfigError::invalid("port is illegal"));
    }
    if service_name.is_empty() {
        return Err(ConfigError::invalid("service name must not be empty"));
    }
    Ok(())
}

fn check_service(service_name: &str, clusters: &[String]) -> Result<()> {
    if service_name.is_empty() {
        return Err(ConfigError::invalid("service name must not be empty"));
    }
    if clusters.is_empty() {
        return Err(ConfigError::invalid("clusters must not be empty"));
    }
    Ok(())
}
