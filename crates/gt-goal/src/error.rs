// error.rs — Error types for the goal tracker.
//
// Store operations themselves never fail; these errors come from the
// collaborators around the store (adapters, config, observers).

use thiserror::Error;

/// Errors raised by persistence adapters, config loading and observers.
#[derive(Debug, Error)]
pub enum GoalError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize goal data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The tracker configuration is invalid.
    #[error("config error: {0}")]
    ConfigError(String),

    /// An observer failed to handle an event (non-fatal).
    #[error("observer error: {0}")]
    ObserverError(String),
}
