//! Unified error types and result handling for bundle-control.

use thiserror::Error;

/// Crate-wide error type covering split validation, lookups, and the
/// persistence and configuration layers.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what failed
        message: String,
    },

    /// Any error raised by the underlying store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested sheet quantity is not a positive number
    #[error("Invalid sheet quantity: {input}")]
    InvalidQuantity {
        /// The offending input, as it was supplied
        input: String,
    },

    /// Requested sheet quantity would not leave the original bundle any sheets
    #[error(
        "Requested {requested} sheets but the bundle holds {available}; the original must keep at least one"
    )]
    QuantityTooLarge {
        /// Sheets requested for the new bundle
        requested: i32,
        /// Sheets currently held by the original bundle
        available: i32,
    },

    /// One of the four SSCC/LUID identifiers is empty after trimming
    #[error("SSCC and LUID identifiers must be non-empty for both bundles")]
    MissingIdentifiers,

    /// No bundle exists with the given id
    #[error("Bundle {id} not found")]
    BundleNotFound {
        /// Primary key that was looked up
        id: i64,
    },

    /// No cut order exists with the given id or code
    #[error("Cut order {order} not found")]
    OrderNotFound {
        /// Order code, or primary key rendered as text
        order: String,
    },

    /// No storage location exists with the given code
    #[error("Storage location {code} not found")]
    LocationNotFound {
        /// Location code that was looked up (e.g. `"C3"`)
        code: String,
    },

    /// No material exists with the given id
    #[error("Material {id} not found")]
    MaterialNotFound {
        /// Primary key that was looked up
        id: i64,
    },

    /// The bundle already reached the terminal `used` status
    #[error("Bundle {id} is marked used and can no longer change status")]
    BundleUsed {
        /// Primary key of the terminal bundle
        id: i64,
    },

    /// A status label outside the known vocabulary was supplied
    #[error("Unknown status label: {value}")]
    InvalidStatus {
        /// The unrecognized label
        value: String,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
