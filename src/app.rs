//! Page session: one object owning all picker state.
//!
//! Built once per page load with [`PickerApp::start`], or from configuration
//! with [`ConfiguredApp::from_config`]. Every user event is a method call,
//! and views are re-derived from the owned state.

use std::fmt;

use tracing::{debug, error, warn};

use crate::catalog::{CatalogSource, CatalogState, HttpCatalogSource, Product, ProductId};
use crate::chat::{ChatBackend, ChatError, ChatSession, HttpChatBackend, TurnOutcome};
use crate::config::PickerConfig;
use crate::error::PickerResult;
use crate::selection::{FileSelectionRepository, SelectionRepository, SelectionStore};
use crate::view::{
    CardAction, CardEvent, CategoryFilter, ChatWindow, ProductGrid, SelectionPanel,
};

/// Alert shown when a routine is requested with nothing selected.
pub const SELECT_PRODUCT_ALERT: &str = "Please select at least one product.";

/// Blocking message for the user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notice {
    /// Modal alert text.
    Alert(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alert(text) => f.write_str(text),
        }
    }
}

/// Session wired to the configured catalog URL, chat endpoint and storage directory.
pub type ConfiguredApp = PickerApp<FileSelectionRepository, HttpChatBackend>;

/// State of one page session.
pub struct PickerApp<R, B> {
    catalog: CatalogState,
    filter: CategoryFilter,
    selection: SelectionStore<R>,
    grid: ProductGrid,
    panel: SelectionPanel,
    chat: ChatSession<B>,
    window: ChatWindow,
    follow_up_input: String,
}

impl<R: SelectionRepository, B: ChatBackend> PickerApp<R, B> {
    /// Load the catalog, then restore the persisted selection.
    ///
    /// A catalog failure is shown in the product area; an unreadable
    /// persisted selection is logged and treated as empty.
    pub async fn start(source: &dyn CatalogSource, repository: R, backend: B) -> Self {
        let catalog = CatalogState::load(source).await;

        let mut grid = ProductGrid::new();
        if catalog.is_failed() {
            grid.show_error();
        }

        let mut selection = SelectionStore::new(repository);
        if let Err(e) = selection.restore() {
            warn!("Ignoring persisted selection: {e}");
        }

        let mut panel = SelectionPanel::new();
        panel.render(selection.ids(), catalog.catalog());

        let chat = ChatSession::new(backend);
        debug!(session = %chat.id(), "Picker session started");

        Self {
            filter: CategoryFilter::new(catalog.catalog()),
            catalog,
            selection,
            grid,
            panel,
            chat,
            window: ChatWindow::new(),
            follow_up_input: String::new(),
        }
    }

    /// Catalog load outcome.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    /// Category filter.
    #[must_use]
    pub const fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Selection store.
    #[must_use]
    pub const fn selection(&self) -> &SelectionStore<R> {
        &self.selection
    }

    /// Product area.
    #[must_use]
    pub const fn products(&self) -> &ProductGrid {
        &self.grid
    }

    /// Selected-products panel.
    #[must_use]
    pub const fn panel(&self) -> &SelectionPanel {
        &self.panel
    }

    /// Chat session and transcript.
    #[must_use]
    pub const fn chat(&self) -> &ChatSession<B> {
        &self.chat
    }

    /// Chat window.
    #[must_use]
    pub const fn chat_window(&self) -> &ChatWindow {
        &self.window
    }

    /// Current follow-up input text.
    #[must_use]
    pub fn follow_up_input(&self) -> &str {
        &self.follow_up_input
    }

    /// Filter value changed.
    pub fn select_category(&mut self, category: &str) {
        self.filter.select(category);

        let Some(catalog) = self.catalog.catalog() else {
            self.grid.show_error();
            return;
        };
        if let Some(products) = self.filter.apply(catalog) {
            debug!("Category {category} matches {} products", products.len());
            let selection = &self.selection;
            self.grid.render(&products, |id| selection.contains(id));
        }
    }

    /// Click on a card body.
    ///
    /// # Errors
    /// Returns an error if the selection cannot be persisted.
    pub fn click_card(&mut self, id: &ProductId) -> PickerResult<CardEvent> {
        let event = self.grid.handle(id, CardAction::Select, &mut self.selection)?;
        if matches!(event, CardEvent::SelectionChanged(_)) {
            self.render_panel();
        }
        Ok(event)
    }

    /// Click on a card's description toggle. Returns the new expanded state.
    pub fn toggle_description(&mut self, id: &ProductId) -> Option<bool> {
        self.grid.toggle_description(id)
    }

    /// Click on a panel row's remove control.
    ///
    /// # Errors
    /// Returns an error if the selection cannot be persisted.
    pub fn remove_selected(&mut self, id: &ProductId) -> PickerResult<bool> {
        let removed = self.selection.remove(id)?;
        if removed {
            self.grid.set_selected(id, false);
        }
        self.render_panel();
        Ok(removed)
    }

    /// Request a routine for the current selection.
    ///
    /// # Errors
    /// Returns a [`Notice`] when nothing selected can be summarised; the
    /// transcript and the service are untouched in that case.
    pub async fn generate_routine(&mut self) -> Result<TurnOutcome, Notice> {
        let products: Vec<&Product> = self.catalog.catalog().map_or_else(Vec::new, |catalog| {
            self.selection
                .ids()
                .iter()
                .filter_map(|id| catalog.get(id))
                .collect()
        });

        match self.chat.generate_routine(&products, &mut self.window).await {
            Ok(outcome) => Ok(outcome),
            Err(ChatError::NothingSelected) => Err(Notice::Alert(SELECT_PRODUCT_ALERT.to_string())),
            Err(e) => {
                error!("Routine request could not be built: {e}");
                Err(Notice::Alert(e.to_string()))
            }
        }
    }

    /// Replace the follow-up input text.
    pub fn set_follow_up_input(&mut self, text: impl Into<String>) {
        self.follow_up_input = text.into();
    }

    /// Submit the follow-up form. Whitespace-only input is ignored.
    pub async fn submit_follow_up(&mut self) -> Option<TurnOutcome> {
        if self.follow_up_input.trim().is_empty() {
            return None;
        }

        let question = std::mem::take(&mut self.follow_up_input);
        match self.chat.ask(&question, &mut self.window).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                debug!("Follow-up ignored: {e}");
                None
            }
        }
    }

    fn render_panel(&mut self) {
        self.panel.render(self.selection.ids(), self.catalog.catalog());
    }
}

impl ConfiguredApp {
    /// Start a session from `config`: catalog and chat over HTTP, selection
    /// persisted under `storage_dir`.
    ///
    /// # Errors
    /// Returns an error if a configured URL is invalid or an HTTP client
    /// cannot be built. Catalog load failures are shown, not returned.
    pub async fn from_config(config: &PickerConfig) -> PickerResult<Self> {
        let source = HttpCatalogSource::from_config(config)?;
        let backend = HttpChatBackend::from_config(config)?;
        let repository = FileSelectionRepository::new(&config.storage_dir);
        debug!(
            "Selection stored at {}, chat at {}",
            repository.path().display(),
            backend.url()
        );
        Ok(Self::start(&source, repository, backend).await)
    }
}
