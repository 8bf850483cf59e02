// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide configuration context.
//!
//! [`ConfigContext`] performs the startup sequence: locate and read the
//! bootstrap file, connect the remote provider when the bootstrap file
//! configures one, and open the override store. The resulting context is
//! meant to be created once and shared by reference.

use crate::adapters::{
    CommandLineAdapter, EnvVarAdapter, JsonFileAdapter, LocalOverrideStore, RemoteConfigAdapter,
    DEFAULT_CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE, DEFAULT_OVERRIDE_FILE,
};
use crate::domain::{ConfigError, ConfigurationService, ProviderSettings, Result};
use crate::ports::{ConfigProvider, ConfigSource, ProviderFactory};
use crate::service::LayeredConfig;
use directories::BaseDirs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Key in the bootstrap document naming the override file.
pub const OVERRIDE_FILE_KEY: &str = "local";

/// Options controlling how the context is opened.
///
/// # Examples
///
/// ```rust
/// use layercfg::service::BootstrapOptions;
///
/// let options = BootstrapOptions::new()
///     .args(vec!["app", "--config=/etc/app/config.json"])
///     .env_var_name("APP_CONFIG_FILE")
///     .override_file_default("app.env");
///
/// assert_eq!(options.get_env_var_name(), "APP_CONFIG_FILE");
/// ```
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    args: Vec<String>,
    env_var_name: String,
    default_file: String,
    override_file_default: String,
    home_dir: Option<PathBuf>,
    env: EnvVarAdapter,
}

impl BootstrapOptions {
    /// Options reading the process arguments and environment.
    pub fn new() -> Self {
        Self {
            args: std::env::args().collect(),
            env_var_name: DEFAULT_CONFIG_ENV_VAR.to_string(),
            default_file: DEFAULT_CONFIG_FILE.to_string(),
            override_file_default: DEFAULT_OVERRIDE_FILE.to_string(),
            home_dir: None,
            env: EnvVarAdapter::new(),
        }
    }

    /// Replaces the command-line arguments searched for the bootstrap path.
    pub fn args<S: Into<String>>(mut self, args: Vec<S>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the variable naming the bootstrap file.
    pub fn env_var_name(mut self, name: impl Into<String>) -> Self {
        self.env_var_name = name.into();
        self
    }

    /// Sets the bootstrap file used when nothing else names one.
    pub fn default_file(mut self, file: impl Into<String>) -> Self {
        self.default_file = file.into();
        self
    }

    /// Sets the override file name used when the bootstrap document has no
    /// `local` key.
    pub fn override_file_default(mut self, name: impl Into<String>) -> Self {
        self.override_file_default = name.into();
        self
    }

    /// Places the override file in `dir` instead of the home directory.
    pub fn home_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(dir.into());
        self
    }

    /// Uses `env` for both the bootstrap-path variable and per-key overrides.
    pub fn env(mut self, env: EnvVarAdapter) -> Self {
        self.env = env;
        self
    }

    /// Returns the variable naming the bootstrap file.
    pub fn get_env_var_name(&self) -> &str {
        &self.env_var_name
    }
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// The resolution context of a process.
///
/// # Examples
///
/// ```rust
/// use layercfg::prelude::*;
/// use layercfg::service::{BootstrapOptions, ConfigContext};
/// use std::collections::HashMap;
///
/// # fn main() -> layercfg::domain::Result<()> {
/// let home = tempfile::tempdir()?;
/// let options = BootstrapOptions::new()
///     .args(vec!["app", "--config=/nonexistent/config.json"])
///     .env(EnvVarAdapter::with_values(HashMap::new()))
///     .home_dir(home.path());
///
/// let context = ConfigContext::open(options, None)?;
/// assert_eq!(context.config().get_string("anything", Some("d")), "d");
/// assert!(context.remote().is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigContext {
    config_path: PathBuf,
    config: LayeredConfig,
    remote: Option<Arc<RemoteConfigAdapter>>,
    overrides: LocalOverrideStore,
}

impl ConfigContext {
    /// Runs the startup sequence.
    ///
    /// The remote layer is connected only when the bootstrap document has a
    /// non-empty `nacos.serverConfigs` list and a non-empty `nacos.dataId`.
    /// In that case a missing `factory`, a failing factory, or a failing
    /// initial fetch is returned as [`ConfigError::ProviderError`]. Every
    /// other problem degrades: an unusable bootstrap file is an empty
    /// document and an unusable override file is an empty store.
    pub fn open(options: BootstrapOptions, factory: Option<&dyn ProviderFactory>) -> Result<Self> {
        let config_path = CommandLineAdapter::from_args(options.args.clone()).resolve_config_path(
            &options.env,
            &options.env_var_name,
            &options.default_file,
        );
        tracing::info!("Using bootstrap file {}", config_path.display());

        let local = JsonFileAdapter::load_or_empty(&config_path);
        let settings = ProviderSettings::from_document(&local.document());

        let remote = match settings {
            Some(settings) => Some(Arc::new(connect_remote(&settings, factory)?)),
            None => None,
        };

        let mut builder = LayeredConfig::builder()
            .with_env(options.env.clone())
            .with_source(Arc::new(local));
        if let Some(remote) = &remote {
            builder = builder.with_source(Arc::clone(remote) as Arc<dyn ConfigSource>);
        }
        let config = builder.build();

        let file_name = config.get_string(OVERRIDE_FILE_KEY, Some(&options.override_file_default));
        let overrides = LocalOverrideStore::open(override_dir(options.home_dir).join(file_name));

        Ok(Self {
            config_path,
            config,
            remote,
            overrides,
        })
    }

    /// Runs the startup sequence, terminating the process on a fatal fault.
    ///
    /// This is the entry point for programs that cannot run without their
    /// configuration. The fault is logged at error level and the process
    /// exits with status 1.
    pub fn bootstrap(options: BootstrapOptions, factory: Option<&dyn ProviderFactory>) -> Self {
        match Self::open(options, factory) {
            Ok(context) => context,
            Err(e) => {
                tracing::error!("Configuration bootstrap failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    /// The resolver for typed lookups.
    pub fn config(&self) -> &LayeredConfig {
        &self.config
    }

    /// The persistent override store.
    pub fn overrides(&self) -> &LocalOverrideStore {
        &self.overrides
    }

    /// The remote layer, when one is configured.
    pub fn remote(&self) -> Option<&RemoteConfigAdapter> {
        self.remote.as_deref()
    }

    /// The raw provider client, when one is configured.
    pub fn provider(&self) -> Option<Arc<dyn ConfigProvider>> {
        self.remote.as_ref().map(|r| r.provider())
    }

    /// The bootstrap file path that was used.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Re-fetches the remote document.
    ///
    /// Does nothing when no remote layer is configured.
    pub fn reload_remote(&self) -> Result<()> {
        match &self.remote {
            Some(remote) => remote.reload(),
            None => Ok(()),
        }
    }
}

fn connect_remote(
    settings: &ProviderSettings,
    factory: Option<&dyn ProviderFactory>,
) -> Result<RemoteConfigAdapter> {
    let factory = factory.ok_or_else(|| ConfigError::ProviderError {
        message: "Bootstrap file configures a provider but no provider factory was given"
            .to_string(),
        source: None,
    })?;

    let provider = factory.create(settings).map_err(|e| match e {
        ConfigError::ProviderError { .. } => e,
        other => ConfigError::provider("Failed to create provider client", other),
    })?;

    RemoteConfigAdapter::connect(provider, settings)
}

fn override_dir(home_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = home_dir {
        return dir;
    }
    match BaseDirs::new() {
        Some(base) => base.home_dir().to_path_buf(),
        None => {
            tracing::warn!("Could not determine the home directory, using the working directory");
            PathBuf::new()
        }
    }
}
