//! Persistence for the selection, modelled as a key-value store.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::error::{SelectionError, SelectionResult};
use crate::catalog::ProductId;

/// Storage key holding the selected identifiers.
pub const STORAGE_KEY: &str = "selectedProducts";

/// Load/save interface injected into the selection store.
pub trait SelectionRepository: Send + Sync {
    /// Read the persisted identifiers; an absent key is an empty list.
    ///
    /// # Errors
    /// Returns an error if storage is unreadable or the value is malformed.
    fn load(&self) -> SelectionResult<Vec<ProductId>>;

    /// Overwrite the persisted identifiers.
    ///
    /// # Errors
    /// Returns an error if storage cannot be written.
    fn save(&self, ids: &[ProductId]) -> SelectionResult<()>;
}

/// Serialize identifiers as a JSON array of strings.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn encode_ids(ids: &[ProductId]) -> SelectionResult<String> {
    Ok(serde_json::to_string(ids)?)
}

/// Parse a persisted JSON array, coercing every entry to a string id.
///
/// Numbers become their decimal text; other entries are dropped.
///
/// # Errors
/// Returns an error if `raw` is not a JSON array.
pub fn decode_ids(raw: &str) -> SelectionResult<Vec<ProductId>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let mut ids = Vec::with_capacity(values.len());
    for value in &values {
        match ProductId::from_json(value) {
            Some(id) => ids.push(id),
            None => tracing::warn!("Dropping unusable persisted selection entry: {value}"),
        }
    }
    Ok(ids)
}

/// In-memory repository holding the serialized value, like a browser store.
#[derive(Debug, Default)]
pub struct MemorySelectionRepository {
    value: Mutex<Option<String>>,
}

impl MemorySelectionRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-seeded with a raw persisted value.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(raw.into())),
        }
    }

    /// The raw persisted value, if any.
    ///
    /// # Errors
    /// Returns an error if the lock is poisoned.
    pub fn raw(&self) -> SelectionResult<Option<String>> {
        self.value
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| SelectionError::Poisoned)
    }
}

impl SelectionRepository for MemorySelectionRepository {
    fn load(&self) -> SelectionResult<Vec<ProductId>> {
        self.raw()?
            .map_or_else(|| Ok(Vec::new()), |raw| decode_ids(&raw))
    }

    fn save(&self, ids: &[ProductId]) -> SelectionResult<()> {
        let encoded = encode_ids(ids)?;
        *self.value.lock().map_err(|_| SelectionError::Poisoned)? = Some(encoded);
        Ok(())
    }
}

/// File-backed repository: one file per storage key under a directory.
#[derive(Clone, Debug)]
pub struct FileSelectionRepository {
    path: PathBuf,
}

impl FileSelectionRepository {
    /// Store the selection under [`STORAGE_KEY`] inside `dir`.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_key(dir, STORAGE_KEY)
    }

    /// Store the selection under a custom key inside `dir`.
    #[must_use]
    pub fn with_key(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SelectionRepository for FileSelectionRepository {
    fn load(&self) -> SelectionResult<Vec<ProductId>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => decode_ids(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, ids: &[ProductId]) -> SelectionResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let encoded = encode_ids(ids)?;
        std::fs::write(&self.path, encoded)?;
        Ok(())
    }
}
