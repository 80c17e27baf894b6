//! Error types for the selection module.

use thiserror::Error;

/// Errors raised while persisting or restoring the selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The persisted value is not a JSON array.
    #[error("persisted selection is malformed: {0}")]
    Decode(#[from] serde_json::Error),

    /// Storage backend failure.
    #[error("selection storage error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage lock was poisoned by a panicking writer.
    #[error("selection storage lock poisoned")]
    Poisoned,
}

/// Convenience result alias for selection operations.
pub type SelectionResult<T> = Result<T, SelectionError>;
