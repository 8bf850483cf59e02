// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the layercfg crate.
//!
//! This example demonstrates:
//! - Opening a context from a bootstrap file
//! - Typed lookups with defaults and zero values
//! - Placeholder interpolation
//! - Per-key environment overrides
//! - The persistent override store
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage -- --config=demos/config.json
//!
//! # Dotted names cannot be exported from most shells; use env(1)
//! env "app.name=FromEnvironment" cargo run --example basic_usage -- --config=demos/config.json
//! ```

use layercfg::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Database {
    host: String,
    port: u16,
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== layercfg: Basic Usage ===\n");

    // No provider factory: the demo bootstrap file has no `nacos` section
    let context = ConfigContext::bootstrap(BootstrapOptions::new(), None);
    let config = context.config();
    println!("Bootstrap file: {}\n", context.config_path().display());

    println!("--- Strings ---");
    println!("app.name      = {}", config.get_string("app.name", Some("DefaultApp")));
    println!("database.url  = {}", config.get_string("database.url", None));

    println!("\n--- Numbers and booleans ---");
    println!("database.port = {}", config.get_int64("database.port", Some(3000)));
    println!("app.debug     = {}", config.get_bool("app.debug", None));
    println!("app.missing   = {} (zero value)", config.get_int("app.missing", None));

    println!("\n--- Arrays ---");
    println!("app.hosts     = {:?}", config.get_array_string("app.hosts"));

    println!("\n--- Structs ---");
    match config.get_struct::<Database>("database")? {
        Some(db) => println!("database      = {}:{}", db.host, db.port),
        None => println!("database      = <absent>"),
    }

    println!("\n--- Override store ---");
    let store = context.overrides();
    let runs = store.get("demo.runs").parse::<u64>().unwrap_or(0) + 1;
    store.set("demo.runs", &runs.to_string())?;
    println!("demo.runs     = {} ({})", runs, store.path().display());

    Ok(())
}
