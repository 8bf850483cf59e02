// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! Most lookups in this crate never fail: a missing key falls through to the next
//! layer and finally to a zero value. The variants below cover the few places
//! where a failure is surfaced to the caller, plus the fatal bootstrap faults
//! reported by [`ConfigContext::open`](crate::service::ConfigContext::open).

use thiserror::Error;

/// The main error type for configuration operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use layercfg::domain::errors::ConfigError;
///
/// fn check_port(port: u64) -> Result<(), ConfigError> {
///     if port == 0 {
///         return Err(ConfigError::ValidationError {
///             message: "port is illegal".to_string(),
///         });
///     }
///     Ok(())
/// }
///
/// assert!(check_port(0).is_err());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A configuration source could not be read.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a configuration document.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A value was found but could not be decoded into the requested type.
    #[error("Failed to decode configuration value for key '{key}' into {target_type}: {source}")]
    DecodeError {
        /// The key being decoded
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying decode error
        source: serde_json::Error,
    },

    /// The remote configuration provider failed.
    #[error("Configuration provider error: {message}")]
    ProviderError {
        /// The error message
        message: String,
        /// The underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A call was rejected because an argument was missing or illegal.
    #[error("Invalid argument: {message}")]
    ValidationError {
        /// The error message
        message: String,
    },

    /// An I/O error occurred while reading or writing configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a `ValidationError` with the given message.
    pub fn invalid(message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            message: message.into(),
        }
    }

    /// Creates a `ProviderError` wrapping an underlying error.
    pub fn provider<E>(message: impl Into<String>, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ConfigError::ProviderError {
            message: message.into(),
            source: Some(Box::new(err)),
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
