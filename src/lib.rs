// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration resolution with push reload.
//!
//! A process reads its configuration from three layers, consulted in a fixed
//! order for every lookup:
//!
//! 1. an environment variable named exactly like the dotted key path
//!    (string lookups only),
//! 2. a remote document fetched from a push-capable provider and replaced
//!    whenever the provider pushes a change,
//! 3. a local JSON bootstrap file, which also says whether and where the
//!    remote provider lives.
//!
//! Missing keys never fail: they fall through to the caller's default and then
//! to the zero value of the requested type. String values may reference other
//! keys with `${key.path}` placeholders.
//!
//! A small persistent override store in the home directory and an
//! argument-checking front for a service discovery client complete the crate.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: document model, coercions, placeholders, errors
//! - **Ports**: traits for document layers, parsers, the provider client and
//!   the discovery client
//! - **Adapters**: the bootstrap file, the remote document, the environment,
//!   the command line and the override store
//! - **Service**: the resolution engine and the startup context
//!
//! # Quick Start
//!
//! ```rust
//! use layercfg::prelude::*;
//! use serde_json::json;
//!
//! let config = LayeredConfig::builder()
//!     .with_document(ConfigDocument::from_value(json!({
//!         "db": {"host": "localhost", "port": "5432"},
//!         "dsn": "postgres://${db.host}:${ db.port }/app",
//!     })))
//!     .build();
//!
//! assert_eq!(config.get_int64("db.port", None), 5432);
//! assert_eq!(config.get_string("dsn", None), "postgres://localhost:5432/app");
//! assert!(!config.get_bool("feature.enabled", None));
//! ```
//!
//! Programs normally start from [`ConfigContext`](service::ConfigContext),
//! which locates the bootstrap file from `--config=<path>`, the
//! `LAYERCFG_CONFIG_FILE` variable or `config.json`, and connects the remote
//! provider through a [`ProviderFactory`](ports::ProviderFactory).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{
        EnvVarAdapter, JsonFileAdapter, JsonParser, LocalOverrideStore, RemoteConfigAdapter,
    };
    pub use crate::domain::{
        ConfigDocument, ConfigError, ConfigKey, ConfigValue, ConfigurationService,
        ProviderSettings, Result,
    };
    pub use crate::ports::{
        ChangeCallback, ConfigChange, ConfigParam, ConfigParser, ConfigProvider, ConfigSource,
        ProviderFactory,
    };
    pub use crate::service::{BootstrapOptions, ConfigContext, LayeredConfig, NamingService};
}
