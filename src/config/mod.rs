//! Configuration module for Shop-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a file is the same as running
//! with an empty one.
//!
//! # Example
//!
//! ```no_run
//! use shop_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Products per storefront: {}", config.harvester.max_products);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ColumnPolicy, Config, HarvesterConfig, IoConfig, UserAgentConfig, DEFAULT_CONTACT_PATHS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
