// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) at the seams of the
//! crate: document parsing, document layers, the remote configuration provider
//! and the service discovery client. Adapters and tests supply the
//! implementations.

pub mod naming;
pub mod parser;
pub mod provider;
pub mod source;

// Re-export commonly used types
pub use naming::{
    DeregisterInstanceParam, Instance, NamingClient, RegisterInstanceParam, SelectInstancesParam,
    SubscribeCallback, SubscribeParam,
};
pub use parser::ConfigParser;
pub use provider::{ChangeCallback, ConfigChange, ConfigParam, ConfigProvider, ProviderFactory};
pub use source::ConfigSource;
