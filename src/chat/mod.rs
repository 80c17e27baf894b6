//! Conversation with the remote routine service.

pub mod backend;
pub mod error;
pub mod session;
pub mod types;

pub use backend::{ChatBackend, HttpChatBackend};
pub use error::{ChatError, ChatResult};
pub use session::{ChatSession, TurnOutcome};
pub use types::{ChatRequest, ChatResponse, Role, Transcript, Turn};
