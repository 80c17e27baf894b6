//! Chat window contents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who a window message is attributed to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The user.
    User,
    /// The service, or a local status line shown on its behalf.
    Bot,
}

impl Sender {
    /// CSS class of the message bubble.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::User => "user-message",
            Self::Bot => "bot-message",
        }
    }
}

/// A message displayed in the chat window.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Attribution.
    pub sender: Sender,
    /// Plain text, never interpreted as markup.
    pub text: String,
    /// When the message was shown.
    pub shown_at: DateTime<Utc>,
}

/// Ordered list of displayed messages.
///
/// This is what the user sees, which is a superset of the transcript:
/// status lines and fallbacks appear here but are never sent to the service.
#[derive(Clone, Debug, Default)]
pub struct ChatWindow {
    messages: Vec<ChatMessage>,
}

impl ChatWindow {
    /// Create an empty window.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Append a message at the bottom.
    pub fn append(&mut self, text: impl Into<String>, sender: Sender) {
        self.messages.push(ChatMessage {
            sender,
            text: text.into(),
            shown_at: Utc::now(),
        });
    }

    /// Every message, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Most recent message.
    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Number of messages.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the window is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_order_and_class() {
        let mut window = ChatWindow::new();
        window.append("question", Sender::User);
        window.append("answer", Sender::Bot);

        assert_eq!(window.len(), 2);
        assert_eq!(window.messages()[0].sender.css_class(), "user-message");
        assert_eq!(window.last().map(|m| m.text.as_str()), Some("answer"));
        assert_eq!(window.last().map(|m| m.sender.css_class()), Some("bot-message"));
    }
}
