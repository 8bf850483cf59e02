// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which turns raw text (a file's
//! content or a payload pushed by a remote provider) into a [`ConfigDocument`].

use crate::domain::{ConfigDocument, Result};

/// A trait for parsing configuration text.
///
/// Parsers keep the document structure intact; callers address nested values
/// with dotted key paths such as `database.host`.
///
/// # Examples
///
/// ```rust
/// use layercfg::domain::{ConfigDocument, Result};
/// use layercfg::ports::ConfigParser;
///
/// struct EmptyParser;
///
/// impl ConfigParser for EmptyParser {
///     fn parse(&self, _content: &str) -> Result<ConfigDocument> {
///         Ok(ConfigDocument::empty())
///     }
/// }
///
/// assert!(EmptyParser.parse("anything").unwrap().is_empty());
/// ```
pub trait ConfigParser: Send + Sync {
    /// Parses configuration content into a document.
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigDocument)` - The parsed document
    /// * `Err(ConfigError)` - The content is not valid for this format
    fn parse(&self, content: &str) -> Result<ConfigDocument>;

    /// Parses `content`, falling back to an empty document on failure.
    ///
    /// Readers use this for sources whose corruption must never be fatal.
    fn parse_or_empty(&self, content: &str) -> ConfigDocument {
        match self.parse(content) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::debug!("Treating unparsable configuration as empty: {}", e);
                ConfigDocument::empty()
            }
        }
    }
}
