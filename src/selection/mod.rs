//! User selection of catalog products.
//!
//! The in-memory set and its persisted mirror are kept identical after every
//! mutating call; see [`SelectionStore`].

pub mod error;
pub mod repository;
pub mod store;

pub use error::{SelectionError, SelectionResult};
pub use repository::{
    FileSelectionRepository, MemorySelectionRepository, STORAGE_KEY, SelectionRepository,
};
pub use store::{SelectionStore, Toggled};
