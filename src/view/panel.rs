//! Selected-products panel.

use crate::catalog::{Catalog, ProductId};

/// Shown when no selected product can be listed.
pub const EMPTY_SELECTION_MESSAGE: &str = "No products selected.";

/// One row of the panel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectionRow {
    /// Product id, the key of the remove action.
    pub id: ProductId,
    /// `Name (Brand)`.
    pub label: String,
    /// Accessible label of the remove control.
    pub remove_label: String,
}

/// What the panel currently shows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PanelView {
    /// A message instead of rows.
    Placeholder(String),
    /// One row per selected product, in selection order.
    Rows(Vec<SelectionRow>),
}

/// The selected-products panel.
#[derive(Clone, Debug)]
pub struct SelectionPanel {
    view: PanelView,
}

impl Default for SelectionPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionPanel {
    /// Start empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: PanelView::Placeholder(EMPTY_SELECTION_MESSAGE.to_string()),
        }
    }

    /// Rebuild the rows for `ids`.
    ///
    /// Ids with no catalog entry are stale and skipped.
    pub fn render(&mut self, ids: &[ProductId], catalog: Option<&Catalog>) {
        let rows: Vec<SelectionRow> = ids
            .iter()
            .filter_map(|id| {
                let product = catalog.and_then(|c| c.get(id));
                if product.is_none() {
                    tracing::debug!("Skipping stale selected id {id}");
                }
                product
            })
            .map(|p| SelectionRow {
                id: p.id.clone(),
                label: format!("{} ({})", p.name, p.brand),
                remove_label: format!("Remove {}", p.name),
            })
            .collect();

        self.view = if rows.is_empty() {
            PanelView::Placeholder(EMPTY_SELECTION_MESSAGE.to_string())
        } else {
            PanelView::Rows(rows)
        };
    }

    /// Current view.
    #[must_use]
    pub const fn view(&self) -> &PanelView {
        &self.view
    }

    /// Rendered rows; empty when the placeholder is shown.
    #[must_use]
    pub fn rows(&self) -> &[SelectionRow] {
        match &self.view {
            PanelView::Rows(rows) => rows.as_slice(),
            PanelView::Placeholder(_) => &[],
        }
    }
}
