//! Error types for the WSGC core library.
//!
//! These errors never cross the host boundary. Each public entry point turns
//! them into a definite outcome and logs them instead.

use thiserror::Error;

/// Top-level error type for all WSGC operations.
#[derive(Error, Debug)]
pub enum WsgcError {
    /// Settings could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A gzip stream was truncated, corrupt or failed its trailer check.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The working-set trim primitive does not exist on this platform.
    #[error("Trim primitive unavailable on {0}")]
    PrimitiveUnavailable(String),

    /// The working-set trim primitive ran and reported failure.
    #[error("Trim primitive failed: {0}")]
    Primitive(String),

    /// A checkpoint identifier outside the fixed set.
    #[error("Unknown checkpoint: {0}")]
    UnknownCheckpoint(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, WsgcError>;
