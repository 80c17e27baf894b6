//! Insertion-ordered selection set with write-through persistence.

use super::error::SelectionResult;
use super::repository::SelectionRepository;
use crate::catalog::ProductId;

/// Result of a [`SelectionStore::toggle`] call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Toggled {
    /// The id was inserted.
    Added,
    /// The id was removed.
    Removed,
}

impl Toggled {
    /// Whether the id is selected after the toggle.
    #[must_use]
    pub const fn is_selected(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Set of selected product ids, mirrored to a repository on every change.
///
/// A mutation is saved before it is committed to memory, so a failed write
/// leaves both sides at their previous value.
pub struct SelectionStore<R> {
    ids: Vec<ProductId>,
    repository: R,
}

impl<R: SelectionRepository> SelectionStore<R> {
    /// Create an empty store over `repository`. Call [`Self::restore`] to load.
    #[must_use]
    pub const fn new(repository: R) -> Self {
        Self {
            ids: Vec::new(),
            repository,
        }
    }

    /// Insert `id` if absent, remove it otherwise.
    ///
    /// # Errors
    /// Returns an error if the new selection cannot be persisted; memory is
    /// left untouched in that case.
    pub fn toggle(&mut self, id: &ProductId) -> SelectionResult<Toggled> {
        let mut next = self.ids.clone();
        let toggled = if let Some(pos) = next.iter().position(|x| x == id) {
            next.remove(pos);
            Toggled::Removed
        } else {
            next.push(id.clone());
            Toggled::Added
        };

        self.commit(next)?;
        tracing::debug!("Selection toggle {id}: {toggled:?}");
        Ok(toggled)
    }

    /// Remove `id` if present. Returns whether anything changed.
    ///
    /// # Errors
    /// Returns an error if the new selection cannot be persisted.
    pub fn remove(&mut self, id: &ProductId) -> SelectionResult<bool> {
        let Some(pos) = self.ids.iter().position(|x| x == id) else {
            return Ok(false);
        };

        let mut next = self.ids.clone();
        next.remove(pos);
        self.commit(next)?;
        tracing::debug!("Selection remove {id}");
        Ok(true)
    }

    /// Merge persisted ids into memory, keeping the first occurrence order.
    ///
    /// # Errors
    /// Returns an error if the repository cannot be read or decoded.
    pub fn restore(&mut self) -> SelectionResult<usize> {
        let saved = self.repository.load()?;
        let before = self.ids.len();
        for id in saved {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
        let added = self.ids.len() - before;
        tracing::debug!("Restored {added} selected products");
        Ok(added)
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    /// Selected ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Number of selected ids.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The backing repository.
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    fn commit(&mut self, next: Vec<ProductId>) -> SelectionResult<()> {
        if let Err(e) = self.repository.save(&next) {
            tracing::warn!("Failed to persist selection: {e}");
            return Err(e);
        }
        self.ids = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::selection::SelectionError;
    use crate::selection::repository::MemorySelectionRepository;

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    fn assert_mirrored(store: &SelectionStore<MemorySelectionRepository>) {
        let saved = store.repository().load().unwrap();
        assert_eq!(saved.len(), store.len());
        let persisted: BTreeSet<ProductId> = saved.into_iter().collect();
        let memory: BTreeSet<ProductId> = store.ids().iter().cloned().collect();
        assert_eq!(persisted, memory);
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut store = SelectionStore::new(MemorySelectionRepository::new());

        assert_eq!(store.toggle(&id("1")).unwrap(), Toggled::Added);
        assert!(store.contains(&id("1")));
        assert_eq!(store.toggle(&id("1")).unwrap(), Toggled::Removed);
        assert!(store.is_empty());
    }

    #[test]
    fn test_persisted_matches_memory_after_every_operation() {
        // Every toggle/remove sequence of length <= 4 over three ids.
        const TARGETS: [&str; 3] = ["1", "2", "3"];
        const CHOICES: usize = TARGETS.len() * 2;

        for length in 0..=4u32 {
            for code in 0..CHOICES.pow(length) {
                let mut store = SelectionStore::new(MemorySelectionRepository::new());
                let mut model: BTreeSet<ProductId> = BTreeSet::new();
                let mut rest = code;

                for _ in 0..length {
                    let choice = rest % CHOICES;
                    rest /= CHOICES;
                    let target = id(TARGETS[choice / 2]);

                    if choice % 2 == 0 {
                        let toggled = store.toggle(&target).unwrap();
                        if !model.remove(&target) {
                            model.insert(target.clone());
                        }
                        assert_eq!(toggled.is_selected(), model.contains(&target));
                    } else {
                        let removed = store.remove(&target).unwrap();
                        assert_eq!(removed, model.remove(&target));
                    }

                    assert_mirrored(&store);
                    let memory: BTreeSet<ProductId> = store.ids().iter().cloned().collect();
                    assert_eq!(memory, model, "sequence {code} of length {length}");
                }
            }
        }
    }

    #[test]
    fn test_remove_absent_is_noop_without_write() {
        let repo = MemorySelectionRepository::new();
        let mut store = SelectionStore::new(repo);

        assert!(!store.remove(&id("4")).unwrap());
        assert!(store.repository().raw().unwrap().is_none());
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut store = SelectionStore::new(MemorySelectionRepository::new());
        for target in ["5", "1", "3"] {
            store.toggle(&id(target)).unwrap();
        }
        assert_eq!(store.ids(), &[id("5"), id("1"), id("3")]);
    }

    #[test]
    fn test_restore_coerces_to_strings() {
        let repo = MemorySelectionRepository::with_raw(r#"[3, "5", 3]"#);
        let mut store = SelectionStore::new(repo);

        assert_eq!(store.restore().unwrap(), 2);
        assert!(store.contains(&id("3")));
        assert!(store.contains(&id("5")));
    }

    #[test]
    fn test_restore_malformed_value() {
        let mut store = SelectionStore::new(MemorySelectionRepository::with_raw("not json"));
        assert!(matches!(store.restore(), Err(SelectionError::Decode(_))));
        assert!(store.is_empty());
    }

    struct FailingRepository {
        fail: AtomicBool,
        inner: MemorySelectionRepository,
    }

    impl SelectionRepository for FailingRepository {
        fn load(&self) -> SelectionResult<Vec<ProductId>> {
            self.inner.load()
        }

        fn save(&self, ids: &[ProductId]) -> SelectionResult<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(std::io::Error::other("disk full").into());
            }
            self.inner.save(ids)
        }
    }

    #[test]
    fn test_failed_write_keeps_memory_unchanged() {
        let repo = FailingRepository {
            fail: AtomicBool::new(false),
            inner: MemorySelectionRepository::new(),
        };
        let mut store = SelectionStore::new(repo);
        store.toggle(&id("1")).unwrap();

        store.repository().fail.store(true, Ordering::SeqCst);
        assert!(store.toggle(&id("2")).is_err());
        assert!(store.remove(&id("1")).is_err());

        assert_eq!(store.ids(), &[id("1")]);
        assert_eq!(store.repository().load().unwrap(), vec![id("1")]);
    }
}
