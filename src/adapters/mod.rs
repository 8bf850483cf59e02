// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing the concrete layers and stores.
//!
//! This module contains implementations of the traits defined in the ports
//! layer: the bootstrap JSON file and the remote provider document implement
//! `ConfigSource`, the environment is consulted by exact key name, and the
//! override store persists a string map in the home directory.

pub mod cli;
pub mod env_var;
pub mod json_file;
pub mod local_store;
pub mod remote;

pub use cli::{CommandLineAdapter, DEFAULT_CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
pub use env_var::EnvVarAdapter;
pub use json_file::{JsonFileAdapter, JsonParser};
pub use local_store::{LocalOverrideStore, DEFAULT_OVERRIDE_FILE};
pub use remote::RemoteConfigAdapter;
