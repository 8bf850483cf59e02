// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line location of the bootstrap file.
//!
//! The only argument this crate understands is the bootstrap file path. Every
//! other argument belongs to the host program and is ignored.

use crate::adapters::EnvVarAdapter;
use std::path::PathBuf;

/// Environment variable naming the bootstrap file when no argument is given.
pub const DEFAULT_CONFIG_ENV_VAR: &str = "LAYERCFG_CONFIG_FILE";

/// Bootstrap file used when neither an argument nor the variable names one.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Extracts the bootstrap file path from command-line arguments.
///
/// It supports three equivalent forms:
/// - `config=<path>`
/// - `-config=<path>`
/// - `--config=<path>`
///
/// When the flag is repeated the last occurrence wins. The path is the text
/// between the first and the second `=`.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::CommandLineAdapter;
///
/// let args = vec!["server", "--verbose", "--config=/etc/app/config.json"];
/// let adapter = CommandLineAdapter::from_args(args);
/// assert_eq!(adapter.config_file(), Some("/etc/app/config.json"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandLineAdapter {
    config_file: Option<String>,
}

impl CommandLineAdapter {
    /// Creates an adapter that names no bootstrap file.
    pub fn new() -> Self {
        Self { config_file: None }
    }

    /// Creates an adapter from a list of arguments.
    pub fn from_args<S: AsRef<str>>(args: Vec<S>) -> Self {
        let mut adapter = Self::new();
        adapter.parse_args(&args);
        adapter
    }

    fn parse_args<S: AsRef<str>>(&mut self, args: &[S]) {
        for arg in args {
            let arg = arg.as_ref();
            let is_config_flag = ["config=", "-config=", "--config="]
                .iter()
                .any(|prefix| arg.starts_with(prefix));
            if is_config_flag {
                let path = arg.split('=').nth(1).unwrap_or_default();
                self.config_file = Some(path.to_string());
            }
        }
    }

    /// Returns the bootstrap path named on the command line, if any.
    ///
    /// An empty path (`--config=`) counts as not given.
    pub fn config_file(&self) -> Option<&str> {
        self.config_file.as_deref().filter(|p| !p.is_empty())
    }

    /// Resolves the bootstrap file path.
    ///
    /// Order: the command-line argument, then the variable `env_var` read
    /// through `env`, then `default_file`. Relative paths are left relative to
    /// the working directory.
    pub fn resolve_config_path(
        &self,
        env: &EnvVarAdapter,
        env_var: &str,
        default_file: &str,
    ) -> PathBuf {
        if let Some(path) = self.config_file() {
            return PathBuf::from(path);
        }
        if let Some(path) = env.get_str(env_var) {
            return PathBuf::from(path);
        }
        PathBuf::from(default_file)
    }
}
