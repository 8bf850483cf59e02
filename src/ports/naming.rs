// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service discovery client port.
//!
//! The discovery client registers this process as an instance of a service and
//! looks up instances of other services. It shares the provider server list with
//! the configuration client but is otherwise independent of it. Argument
//! validation lives in [`NamingService`](crate::service::NamingService); the
//! client behind this port is external.

use crate::domain::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// A registered service instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Instance {
    /// Instance identifier assigned by the registry
    pub instance_id: String,
    /// Instance address
    pub ip: String,
    /// Instance port
    pub port: u64,
    /// Load-balancing weight
    pub weight: f64,
    /// Whether the instance accepts traffic
    pub enable: bool,
    /// Whether the registry considers the instance healthy
    pub healthy: bool,
    /// Whether the registration disappears when heartbeats stop
    pub ephemeral: bool,
    /// Cluster the instance belongs to
    pub cluster_name: String,
    /// Service the instance belongs to
    pub service_name: String,
    /// Free-form metadata
    pub metadata: HashMap<String, String>,
}

/// Parameters for registering an instance.
#[derive(Clone, Debug, PartialEq)]
pub struct RegisterInstanceParam {
    /// Instance address
    pub ip: String,
    /// Instance port
    pub port: u64,
    /// Service name
    pub service_name: String,
    /// Cluster name, possibly empty
    pub cluster_name: String,
    /// Free-form metadata
    pub metadata: HashMap<String, String>,
    /// Load-balancing weight
    pub weight: f64,
    /// Whether the instance accepts traffic
    pub enable: bool,
    /// Whether the instance starts healthy
    pub healthy: bool,
    /// Whether the registration disappears when heartbeats stop
    pub ephemeral: bool,
}

/// Parameters for deregistering an instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeregisterInstanceParam {
    /// Instance address
    pub ip: String,
    /// Instance port
    pub port: u64,
    /// Service name
    pub service_name: String,
    /// Cluster name, possibly empty
    pub cluster: String,
    /// Whether the registration was ephemeral
    pub ephemeral: bool,
}

/// Parameters for listing instances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectInstancesParam {
    /// Service name
    pub service_name: String,
    /// Clusters to include
    pub clusters: Vec<String>,
    /// Only return healthy instances
    pub healthy_only: bool,
}

/// Callback invoked with the current instance list of a subscribed service.
pub type SubscribeCallback = Arc<dyn Fn(Result<Vec<Instance>>) + Send + Sync>;

/// Parameters for subscribing to a service's instance list.
#[derive(Clone)]
pub struct SubscribeParam {
    /// Service name
    pub service_name: String,
    /// Clusters to include
    pub clusters: Vec<String>,
    /// Change callback
    pub callback: SubscribeCallback,
}

impl std::fmt::Debug for SubscribeParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscribeParam")
            .field("service_name", &self.service_name)
            .field("clusters", &self.clusters)
            .finish_non_exhaustive()
    }
}

/// A service discovery client.
pub trait NamingClient: Send + Sync {
    /// Registers an instance; returns whether the registry accepted it.
    fn register_instance(&self, param: RegisterInstanceParam) -> Result<bool>;

    /// Deregisters an instance; returns whether the registry accepted it.
    fn deregister_instance(&self, param: DeregisterInstanceParam) -> Result<bool>;

    /// Subscribes to changes of a service's instance list.
    fn subscribe(&self, param: SubscribeParam) -> Result<()>;

    /// Lists instances, optionally only healthy ones.
    fn select_instances(&self, param: SelectInstancesParam) -> Result<Vec<Instance>>;

    /// Lists all instances regardless of health.
    fn select_all_instances(&self, service_name: &str, clusters: &[String])
        -> Result<Vec<Instance>>;
}
