/// Database configuration and connection management
pub mod database;

/// Storage location catalog loading from config.toml
pub mod locations;
