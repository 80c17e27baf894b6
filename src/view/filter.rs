//! Category filter.

use crate::catalog::{Catalog, Product};

/// The category drop-down: its options and the current value.
///
/// No value is chosen initially, so nothing is listed until the user picks one.
#[derive(Clone, Debug, Default)]
pub struct CategoryFilter {
    options: Vec<String>,
    selected: Option<String>,
}

impl CategoryFilter {
    /// Build the option list from the catalog's categories.
    #[must_use]
    pub fn new(catalog: Option<&Catalog>) -> Self {
        let options: Vec<String> = catalog
            .map(|c| c.categories().into_iter().map(str::to_string).collect())
            .unwrap_or_default();
        Self {
            options,
            selected: None,
        }
    }

    /// Available categories.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Current value, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Change the current value.
    pub fn select(&mut self, category: impl Into<String>) {
        self.selected = Some(category.into());
    }

    /// Products matching the current value, or `None` when nothing is chosen.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Option<Vec<&'a Product>> {
        self.selected
            .as_deref()
            .map(|category| catalog.by_category(category))
    }
}
