// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! This module defines the `ConfigSource` trait, the port for document layers
//! consulted by the resolution engine. The environment is not a document layer:
//! it is consulted by exact variable name and handled by
//! [`EnvVarAdapter`](crate::adapters::EnvVarAdapter).

use crate::domain::{ConfigDocument, Result};
use std::sync::Arc;

/// A layer that provides a configuration document.
///
/// Implementations must be `Send + Sync`; documents are handed out as shared
/// immutable snapshots so a reader keeps a consistent view for the whole lookup
/// even if the layer is replaced concurrently.
///
/// # Priority
///
/// Layers with higher priority are consulted first:
///
/// - **2**: Remote provider document
/// - **1**: Local bootstrap file
///
/// # Examples
///
/// ```rust
/// use layercfg::domain::{ConfigDocument, Result};
/// use layercfg::ports::ConfigSource;
/// use std::sync::Arc;
///
/// struct Fixed(Arc<ConfigDocument>);
///
/// impl ConfigSource for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn priority(&self) -> u8 {
///         1
///     }
///
///     fn document(&self) -> Arc<ConfigDocument> {
///         Arc::clone(&self.0)
///     }
/// }
///
/// let source = Fixed(Arc::new(ConfigDocument::empty()));
/// assert!(source.document().is_empty());
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns a short name used in logs, e.g. `"json-file"` or `"remote"`.
    fn name(&self) -> &str;

    /// Returns the priority of this layer; higher values win.
    fn priority(&self) -> u8;

    /// Returns the current document snapshot.
    fn document(&self) -> Arc<ConfigDocument>;

    /// Refreshes the layer from its origin.
    ///
    /// Layers that are fixed for the life of the process keep the default
    /// no-op.
    fn reload(&self) -> Result<()> {
        Ok(())
    }
}
