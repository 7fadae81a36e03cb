//! Error types for core module
//!
//! Provides custom error types for storage slots and configuration files.

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage file I/O error
    #[error("Storage I/O error: {0}")]
    StorageIo(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage backend not reachable (no window, storage disabled, ...)
    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
