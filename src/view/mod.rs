//! View models for the product area, the selection panel and the chat window.
//!
//! Nothing here knows about markup; each type exposes exactly the state a
//! page needs to draw and the keyed actions it can dispatch back.

pub mod chat_window;
pub mod filter;
pub mod panel;
pub mod products;

pub use chat_window::{ChatMessage, ChatWindow, Sender};
pub use filter::CategoryFilter;
pub use panel::{PanelView, SelectionPanel, SelectionRow};
pub use products::{CardAction, CardEvent, Caret, ProductCard, ProductGrid, ProductView};
