//! Product catalog, loaded once at startup.
//!
//! The catalog is read from a `{ "products": [...] }` document through a
//! [`CatalogSource`] and never changes for the rest of the session.

pub mod error;
pub mod source;
pub mod types;

pub use error::{CatalogError, CatalogResult};
pub use source::{CatalogSource, FileCatalogSource, HttpCatalogSource, StaticCatalogSource};
pub use types::{Catalog, CatalogDocument, Product, ProductId};

/// Outcome of the single startup load.
#[derive(Clone, Debug)]
pub enum CatalogState {
    /// The catalog is available.
    Loaded(Catalog),
    /// Loading failed; the message is shown in place of the products.
    Failed(String),
}

impl CatalogState {
    /// Load from `source`, turning failures into a visible state.
    pub async fn load(source: &dyn CatalogSource) -> Self {
        match source.load().await {
            Ok(catalog) => {
                tracing::info!("Catalog loaded with {} products", catalog.len());
                Self::Loaded(catalog)
            }
            Err(e) => {
                tracing::error!("Failed to load catalog: {e}");
                Self::Failed(e.to_string())
            }
        }
    }

    /// The catalog, if it loaded.
    #[must_use]
    pub const fn catalog(&self) -> Option<&Catalog> {
        match self {
            Self::Loaded(catalog) => Some(catalog),
            Self::Failed(_) => None,
        }
    }

    /// Whether loading failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
