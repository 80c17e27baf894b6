//! Product cards.
//!
//! Each render rebuilds every card from the filtered products and the
//! selection, which also resets each card's description state.

use crate::catalog::{Product, ProductId};
use crate::selection::{SelectionRepository, SelectionResult, SelectionStore, Toggled};

/// Initial prompt before a category is chosen.
pub const SELECT_CATEGORY_MESSAGE: &str = "Select a category to view products";
/// Shown when a category has no product.
pub const NO_PRODUCTS_MESSAGE: &str = "No products found.";
/// Shown when the catalog failed to load.
pub const CATALOG_ERROR_MESSAGE: &str = "Unable to load products.";

/// Direction of the description toggle icon.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Caret {
    /// Description collapsed.
    Down,
    /// Description expanded.
    Up,
}

impl Caret {
    /// Icon class name.
    #[must_use]
    pub const fn icon_class(self) -> &'static str {
        match self {
            Self::Down => "fa-caret-down",
            Self::Up => "fa-caret-up",
        }
    }
}

/// One rendered product card.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProductCard {
    /// Product id, the key for every action on this card.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// Image reference.
    pub image: String,
    /// Description text.
    pub description: String,
    /// Highlighted as selected.
    pub selected: bool,
    /// Description expanded. Local to this render.
    pub expanded: bool,
}

impl ProductCard {
    fn from_product(product: &Product, selected: bool) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            image: product.image.clone(),
            description: product.description.clone(),
            selected,
            expanded: false,
        }
    }

    /// Alternative text of the image.
    #[must_use]
    pub fn image_alt(&self) -> &str {
        &self.name
    }

    /// Element id of the description, referenced by the toggle control.
    #[must_use]
    pub fn description_id(&self) -> String {
        format!("desc-{}", self.id)
    }

    /// Value of the toggle's accessible-expanded attribute.
    #[must_use]
    pub const fn aria_expanded(&self) -> &'static str {
        if self.expanded { "true" } else { "false" }
    }

    /// Whether the description paragraph is hidden.
    #[must_use]
    pub const fn description_hidden(&self) -> bool {
        !self.expanded
    }

    /// Toggle icon.
    #[must_use]
    pub const fn indicator(&self) -> Caret {
        if self.expanded { Caret::Up } else { Caret::Down }
    }
}

/// What the product area currently shows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProductView {
    /// A message instead of cards.
    Placeholder(String),
    /// The catalog could not be loaded.
    Error(String),
    /// One card per filtered product.
    Cards(Vec<ProductCard>),
}

/// Interaction on a card.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CardAction {
    /// Click on the card body.
    Select,
    /// Click on the description toggle; never changes the selection.
    ToggleDescription,
}

/// Effect of a dispatched [`CardAction`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CardEvent {
    /// Selection membership changed.
    SelectionChanged(Toggled),
    /// Description toggled; `true` when now expanded.
    DescriptionToggled(bool),
    /// No card with that id is rendered.
    Ignored,
}

/// The product area.
#[derive(Clone, Debug)]
pub struct ProductGrid {
    view: ProductView,
}

impl Default for ProductGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductGrid {
    /// Start with the category prompt.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: ProductView::Placeholder(SELECT_CATEGORY_MESSAGE.to_string()),
        }
    }

    /// Show the catalog load failure.
    pub fn show_error(&mut self) {
        self.view = ProductView::Error(CATALOG_ERROR_MESSAGE.to_string());
    }

    /// Rebuild the cards for `products`.
    pub fn render(&mut self, products: &[&Product], is_selected: impl Fn(&ProductId) -> bool) {
        if products.is_empty() {
            self.view = ProductView::Placeholder(NO_PRODUCTS_MESSAGE.to_string());
            return;
        }
        let cards = products
            .iter()
            .map(|p| ProductCard::from_product(p, is_selected(&p.id)))
            .collect();
        self.view = ProductView::Cards(cards);
    }

    /// Current view.
    #[must_use]
    pub const fn view(&self) -> &ProductView {
        &self.view
    }

    /// Rendered cards; empty when a placeholder is shown.
    #[must_use]
    pub fn cards(&self) -> &[ProductCard] {
        match &self.view {
            ProductView::Cards(cards) => cards.as_slice(),
            ProductView::Placeholder(_) | ProductView::Error(_) => &[],
        }
    }

    /// Rendered card for `id`.
    #[must_use]
    pub fn card(&self, id: &ProductId) -> Option<&ProductCard> {
        self.cards().iter().find(|c| &c.id == id)
    }

    fn card_mut(&mut self, id: &ProductId) -> Option<&mut ProductCard> {
        match &mut self.view {
            ProductView::Cards(cards) => cards.iter_mut().find(|c| &c.id == id),
            ProductView::Placeholder(_) | ProductView::Error(_) => None,
        }
    }

    /// Update the highlight of a rendered card. Returns whether it is rendered.
    pub fn set_selected(&mut self, id: &ProductId, selected: bool) -> bool {
        self.card_mut(id).map(|card| card.selected = selected).is_some()
    }

    /// Flip a card's description. Returns the new expanded state.
    pub fn toggle_description(&mut self, id: &ProductId) -> Option<bool> {
        self.card_mut(id).map(|card| {
            card.expanded = !card.expanded;
            card.expanded
        })
    }

    /// Dispatch `action` on the card keyed by `id`.
    ///
    /// # Errors
    /// Returns an error if a selection change cannot be persisted; the card
    /// keeps its previous highlight in that case.
    pub fn handle<R: SelectionRepository>(
        &mut self,
        id: &ProductId,
        action: CardAction,
        selection: &mut SelectionStore<R>,
    ) -> SelectionResult<CardEvent> {
        if self.card(id).is_none() {
            return Ok(CardEvent::Ignored);
        }

        match action {
            CardAction::Select => {
                let toggled = selection.toggle(id)?;
                self.set_selected(id, toggled.is_selected());
                Ok(CardEvent::SelectionChanged(toggled))
            }
            CardAction::ToggleDescription => Ok(self
                .toggle_description(id)
                .map_or(CardEvent::Ignored, CardEvent::DescriptionToggled)),
        }
    }
}
