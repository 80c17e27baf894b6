//! Top-level error type.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::chat::ChatError;
use crate::selection::SelectionError;

/// Any error surfaced by the picker.
#[derive(Debug, Error)]
pub enum PickerError {
    /// Catalog loading failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Selection persistence failed.
    #[error(transparent)]
    Selection(#[from] SelectionError),
    /// Chat call or guard failed.
    #[error(transparent)]
    Chat(#[from] ChatError),
}

/// Convenience result alias for picker operations.
pub type PickerResult<T> = Result<T, PickerError>;
