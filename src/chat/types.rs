//! Transcript and wire types for the chat endpoint.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Originator of a transcript turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Text written by the user or built from their selection.
    User,
    /// Reply from the remote service.
    Bot,
}

impl Role {
    /// Stable string form used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One unit of transcript content.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Originator.
    pub role: Role,
    /// Text content.
    pub content: String,
}

impl Turn {
    /// Build a user turn.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Build a bot turn.
    #[must_use]
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
        }
    }
}

/// Append-only ordered list of turns, sent whole on every call.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript.
    #[must_use]
    pub const fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Append a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    /// Append a bot turn.
    pub fn push_bot(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::bot(content));
    }

    /// Every turn, oldest first.
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turn was appended yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Request body: `{ "history": [...] }`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    /// Full transcript so far.
    pub history: &'a [Turn],
}

/// Response body: `{ "reply": "..." }`.
///
/// Any JSON body is accepted. `reply` is kept only when it is a string, so a
/// missing, `null`, non-string field or a non-object body all read as no reply.
#[derive(Clone, Debug, Default)]
pub struct ChatResponse {
    /// Generated reply.
    pub reply: Option<String>,
}

impl<'de> Deserialize<'de> for ChatResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let body = serde_json::Value::deserialize(deserializer)?;
        let reply = body
            .get("reply")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        Ok(Self { reply })
    }
}

impl ChatResponse {
    /// The reply text, treating an empty string as absent.
    #[must_use]
    pub fn reply_text(&self) -> Option<&str> {
        self.reply.as_deref().filter(|r| !r.is_empty())
    }
}
