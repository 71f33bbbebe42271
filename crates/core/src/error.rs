//! Error types for bup-core
//!
//! Provides a unified error type shared by the core, the storage adapter
//! and the CLI. Adapter failures inside a folder upload are captured per
//! task and never abort the batch; everything else surfaces once.

use thiserror::Error;

/// Result type alias for bup-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for bup-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Profile or local path not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Profile name already taken
    #[error("Duplicate profile name: {0}")]
    DuplicateName(String),

    /// IO error (config file, directory walk)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error (config file serialization)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Storage service call failed
    #[error("Provider error: {0}")]
    Provider(String),
}
