// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module holds the document model probed by dotted key paths, the value
//! coercions, the placeholder language and the error type. It is independent of
//! any concrete source, provider or file location.

pub mod config_key;
pub mod config_value;
pub mod document;
pub mod errors;
pub mod placeholder;
pub mod service;
pub mod settings;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use document::ConfigDocument;
pub use errors::{ConfigError, Result};
pub use service::ConfigurationService;
pub use settings::{ClientOptions, ProviderSettings, ServerConfig};
