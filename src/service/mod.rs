// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer.
//!
//! This module contains the resolution engine implementing the
//! `ConfigurationService` trait, the startup context that wires the layers
//! together, and the argument-checking front of the discovery client.

pub mod context;
pub mod naming_service;
pub mod resolver;

// Re-export commonly used types
pub use context::{BootstrapOptions, ConfigContext};
pub use naming_service::NamingService;
pub use resolver::{LayeredConfig, LayeredConfigBuilder};
