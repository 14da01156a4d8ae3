//! Storage location catalog loading from config.toml
//!
//! This module provides functionality to load the fixed set of storage
//! location codes from a TOML configuration file. The locations defined in
//! config.toml are used to seed the database on first run or when locations
//! are missing.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of storage location configurations to seed
    pub locations: Vec<LocationConfig>,
}

/// Configuration for a single storage location
#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    /// Location code (e.g. `"C1"`)
    pub code: String,
}

impl Config {
    /// Returns true when `code` is one of the configured location codes.
    #[must_use]
    pub fn is_valid_code(&self, code: &str) -> bool {
        self.locations.iter().any(|location| location.code == code)
    }
}

/// Loads the location catalog from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Returns
/// * `Ok(Config)` - Successfully parsed configuration
/// * `Err(Error)` - Failed to read or parse the configuration file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read (`Error::Io`)
/// - The TOML syntax is invalid or required fields are missing
///   (`Error::Config`)
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref())?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the location catalog from the default location (./config.toml)
///
/// # Returns
/// * `Ok(Config)` - Successfully parsed configuration
/// * `Err(Error)` - Failed to read or parse the configuration file
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}
