// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON document readers.
//!
//! This module provides the JSON parser used for both the bootstrap file and
//! remote payloads, and the adapter exposing the bootstrap file as the local
//! document layer.

use crate::domain::{ConfigDocument, ConfigError, Result};
use crate::ports::{ConfigParser, ConfigSource};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// JSON parser implementation.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::JsonParser;
/// use layercfg::domain::ConfigKey;
/// use layercfg::ports::ConfigParser;
///
/// let parser = JsonParser::new();
/// let doc = parser.parse(r#"{"database": {"host": "localhost", "port": 5432}}"#).unwrap();
/// assert_eq!(doc.get_string(&ConfigKey::from("database.host")), Some("localhost".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl JsonParser {
    /// Creates a new JSON parser.
    pub fn new() -> Self {
        JsonParser
    }
}

impl ConfigParser for JsonParser {
    fn parse(&self, content: &str) -> Result<ConfigDocument> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse JSON: {}", e),
                source: Some(Box::new(e)),
            })?;
        Ok(ConfigDocument::from_value(value))
    }
}

/// The bootstrap file as the local document layer.
///
/// The document is read once and never changes afterwards.
///
/// # Priority
///
/// The local file has a priority of 1; the remote document (priority 2) wins.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::JsonFileAdapter;
/// use layercfg::ports::ConfigSource;
///
/// // A missing file behaves as `{}`
/// let adapter = JsonFileAdapter::load_or_empty("/nonexistent/config.json");
/// assert!(adapter.document().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileAdapter {
    /// Path to the JSON file
    file_path: PathBuf,
    /// Parsed document
    document: Arc<ConfigDocument>,
}

impl JsonFileAdapter {
    /// Reads and parses the file at `path`.
    ///
    /// Fails when the file cannot be read or is not valid JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();
        let content = read_file(&file_path)?;
        let document = JsonParser::new().parse(&content)?;

        Ok(Self {
            file_path,
            document: Arc::new(document),
        })
    }

    /// Reads the file at `path`, using an empty document on any failure.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let file_path = path.as_ref().to_path_buf();
        match Self::from_file(&file_path) {
            Ok(adapter) => adapter,
            Err(e) => {
                tracing::debug!(
                    "Bootstrap file {} unusable, using empty document: {}",
                    file_path.display(),
                    e
                );
                Self::from_document(file_path, ConfigDocument::empty())
            }
        }
    }

    /// Creates an adapter around an already parsed document.
    pub fn from_document(file_path: impl Into<PathBuf>, document: ConfigDocument) -> Self {
        Self {
            file_path: file_path.into(),
            document: Arc::new(document),
        }
    }

    /// Returns the path to the configuration file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl ConfigSource for JsonFileAdapter {
    fn name(&self) -> &str {
        "json-file"
    }

    fn priority(&self) -> u8 {
        1
    }

    fn document(&self) -> Arc<ConfigDocument> {
        Arc::clone(&self.document)
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ConfigError::SourceError {
        source_name: "json-file".to_string(),
        message: format!("Failed to read configuration file: {}", path.display()),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigKey;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_json_parser_nested() {
        let parser = JsonParser::new();
        let doc = parser
            .parse(r#"{"database": {"host": "localhost", "port": 5432}}"#)
            .unwrap();

        assert_eq!(
            doc.get_string(&ConfigKey::from("database.host")),
            Some("localhost".to_string())
        );
        assert_eq!(doc.get_i64(&ConfigKey::from("database.port")), Some(5432));
    }

    #[test]
    fn test_json_parser_invalid() {
        let parser = JsonParser::new();
        let result = parser.parse("{ not json");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_json_adapter_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"app": {{"name": "orders"}}}}"#).unwrap();

        let adapter = JsonFileAdapter::from_file(temp_file.path()).unwrap();

        assert_eq!(adapter.name(), "json-file");
        assert_eq!(adapter.priority(), 1);
        assert_eq!(adapter.file_path(), temp_file.path());
        assert_eq!(
            adapter.document().get_string(&ConfigKey::from("app.name")),
            Some("orders".to_string())
        );
    }

    #[test]
    fn test_json_adapter_large_file() {
        let blob = "x".repeat(11 * 1024 * 1024);
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"blob": "{}", "port": 8080}}"#, blob).unwrap();

        let adapter = JsonFileAdapter::load_or_empty(temp_file.path());
        assert_eq!(
            adapter.document().get_i64(&ConfigKey::from("port")),
            Some(8080)
        );
    }

    #[test]
    fn test_json_adapter_nonexistent_file() {
        let result = JsonFileAdapter::from_file("/nonexistent/path/to/config.json");
        assert!(matches!(result, Err(ConfigError::SourceError { .. })));
    }

    #[test]
    fn test_load_or_empty_missing_file() {
        let adapter = JsonFileAdapter::load_or_empty("/nonexistent/path/to/config.json");
        assert!(adapter.document().is_empty());
    }

    #[test]
    fn test_load_or_empty_corrupt_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "server: {{ port").unwrap();

        let adapter = JsonFileAdapter::load_or_empty(temp_file.path());
        assert_eq!(*adapter.document(), ConfigDocument::empty());
    }

    #[test]
    fn test_document_is_shared_snapshot() {
        let adapter =
            JsonFileAdapter::from_document("inline.json", ConfigDocument::empty());
        let first = adapter.document();
        let second = adapter.document();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
