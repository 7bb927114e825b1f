//! Core error types for ratekeeper-core.
//!
//! Only construction and file handling can fail: store reads degrade to
//! defaults and the engine operations themselves are infallible.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for ratekeeper-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Store-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence errors. Only opening the store surfaces here; reads fall
/// back to defaults and writes are best-effort.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store file
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Schema setup failed
    #[error("Store migration failed: {0}")]
    MigrationFailed(String),

    /// Could not resolve the data directory
    #[error("Failed to resolve data directory: {0}")]
    DataDir(String),
}

/// Configuration errors: policy file handling and engine assembly.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load the policy file
    #[error("Failed to load policy from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save the policy file
    #[error("Failed to save policy to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// The engine builder is missing a required collaborator
    #[error("Missing required dependency: {0}")]
    MissingDependency(&'static str),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
