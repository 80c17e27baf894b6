//! Chat session: routine generation and follow-up questions.
//!
//! Both entry points append a user turn, send the entire transcript, and on
//! a usable reply append a bot turn. Fallbacks and transport failures are
//! shown in the window only, so they are never replayed to the service.

use serde::Serialize;
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::backend::ChatBackend;
use super::error::{ChatError, ChatResult};
use super::types::Transcript;
use crate::catalog::Product;
use crate::view::{ChatWindow, Sender};

/// Opening line of the routine request.
pub const ROUTINE_PROMPT_PREFIX: &str =
    "Please create a personalized skincare/haircare routine using the following products:";
/// Status line shown while a routine is requested.
pub const GENERATING_MESSAGE: &str = "Generating your routine...";
/// Shown when a routine request gets no reply.
pub const ROUTINE_FALLBACK: &str = "Sorry, I didn't get a response. Try again.";
/// Shown when a follow-up gets no reply.
pub const FOLLOW_UP_FALLBACK: &str = "Sorry, I couldn't answer that.";
/// Shown on network or parse failure.
pub const CONNECTION_ERROR_MESSAGE: &str = "Error connecting to AI service.";

/// How a single exchange with the service ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TurnOutcome {
    /// A reply was appended to the transcript.
    Replied(String),
    /// The response had no reply; a fallback was shown.
    MissingReply,
    /// The call failed; an error line was shown.
    Failed(String),
}

#[derive(Serialize)]
struct ProductSummary<'a> {
    name: &'a str,
    brand: &'a str,
    category: &'a str,
    description: &'a str,
}

/// Build the routine request text for `products`.
///
/// # Errors
/// Returns an error if the summary cannot be serialized.
pub fn routine_prompt(products: &[&Product]) -> ChatResult<String> {
    let summary: Vec<ProductSummary<'_>> = products
        .iter()
        .map(|p| ProductSummary {
            name: &p.name,
            brand: &p.brand,
            category: &p.category,
            description: &p.description,
        })
        .collect();
    let json = serde_json::to_string_pretty(&summary)?;
    Ok(format!("{ROUTINE_PROMPT_PREFIX}\n{json}"))
}

/// Conversation with the remote service for one page session.
pub struct ChatSession<B> {
    id: Uuid,
    transcript: Transcript,
    backend: B,
}

impl<B: ChatBackend> ChatSession<B> {
    /// Start an empty conversation over `backend`.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            id: Uuid::new_v4(),
            transcript: Transcript::new(),
            backend,
        }
    }

    /// Session identifier, used in logs.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The transcript so far.
    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Ask for a routine built from `products`.
    ///
    /// # Errors
    /// Returns [`ChatError::NothingSelected`] without touching the transcript
    /// or calling the service when `products` is empty.
    pub async fn generate_routine(
        &mut self,
        products: &[&Product],
        window: &mut ChatWindow,
    ) -> ChatResult<TurnOutcome> {
        if products.is_empty() {
            return Err(ChatError::NothingSelected);
        }

        let prompt = routine_prompt(products)?;
        self.transcript.push_user(prompt);
        window.append(GENERATING_MESSAGE, Sender::Bot);
        debug!(session = %self.id, "Requesting routine for {} products", products.len());

        Ok(self.exchange(window, ROUTINE_FALLBACK).await)
    }

    /// Ask a follow-up question.
    ///
    /// # Errors
    /// Returns [`ChatError::EmptyQuestion`] without side effects when the
    /// trimmed question is empty.
    pub async fn ask(&mut self, question: &str, window: &mut ChatWindow) -> ChatResult<TurnOutcome> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatError::EmptyQuestion);
        }

        window.append(question, Sender::User);
        self.transcript.push_user(question);
        debug!(session = %self.id, "Follow-up question queued");

        Ok(self.exchange(window, FOLLOW_UP_FALLBACK).await)
    }

    async fn exchange(&mut self, window: &mut ChatWindow, fallback: &str) -> TurnOutcome {
        let result = self.backend.send(self.transcript.turns()).await;

        match result {
            Ok(response) => {
                if let Some(reply) = response.reply_text() {
                    let reply = reply.to_string();
                    self.transcript.push_bot(reply.clone());
                    window.append(reply.clone(), Sender::Bot);
                    debug!(session = %self.id, "Transcript now has {} turns", self.transcript.len());
                    TurnOutcome::Replied(reply)
                } else {
                    warn!(session = %self.id, "Chat response had no reply");
                    window.append(fallback, Sender::Bot);
                    TurnOutcome::MissingReply
                }
            }
            Err(e) => {
                error!(session = %self.id, "Chat request failed: {e}");
                window.append(CONNECTION_ERROR_MESSAGE, Sender::Bot);
                TurnOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::sample_products;
    use crate::chat::backend::testing::ScriptedBackend;
    use crate::chat::types::{Role, Turn};

    #[test]
    fn test_routine_prompt_lists_products() {
        let products = sample_products();
        let prompt = routine_prompt(&[&products[1]]).unwrap();

        assert!(prompt.starts_with(&format!("{ROUTINE_PROMPT_PREFIX}\n[")));
        let json: serde_json::Value =
            serde_json::from_str(&prompt[ROUTINE_PROMPT_PREFIX.len() + 1..]).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "name": "Daily Lotion",
                "brand": "CeraVe",
                "category": "moisturizer",
                "description": "Daily Lotion by CeraVe."
            }])
        );
        assert!(prompt.contains("\n  {\n    \"name\""));
    }

    #[tokio::test]
    async fn test_routine_with_nothing_selected() {
        let mut session = ChatSession::new(ScriptedBackend::new().reply("unused"));
        let mut window = ChatWindow::new();

        let result = session.generate_routine(&[], &mut window).await;

        assert!(matches!(result, Err(ChatError::NothingSelected)));
        assert!(session.transcript().is_empty());
        assert!(session.backend().calls().is_empty());
        assert!(window.is_empty());
    }

    #[tokio::test]
    async fn test_routine_reply_appended() {
        let products = sample_products();
        let mut session = ChatSession::new(ScriptedBackend::new().reply("Use product A then B"));
        let mut window = ChatWindow::new();

        let outcome = session
            .generate_routine(&[&products[0], &products[2]], &mut window)
            .await
            .unwrap();

        assert_eq!(outcome, TurnOutcome::Replied("Use product A then B".to_string()));
        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1], Turn::bot("Use product A then B"));

        let texts: Vec<&str> = window.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec![GENERATING_MESSAGE, "Use product A then B"]);

        // The status line is not part of the payload.
        let calls = session.backend().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 1);
        assert_eq!(calls[0][0].role, Role::User);
    }

    #[tokio::test]
    async fn test_missing_reply_leaves_transcript() {
        let products = sample_products();
        let mut session = ChatSession::new(ScriptedBackend::new().no_reply());
        let mut window = ChatWindow::new();

        let outcome = session
            .generate_routine(&[&products[0]], &mut window)
            .await
            .unwrap();

        assert_eq!(outcome, TurnOutcome::MissingReply);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(window.last().map(|m| m.text.as_str()), Some(ROUTINE_FALLBACK));
    }

    #[tokio::test]
    async fn test_follow_up_whitespace_ignored() {
        let mut session = ChatSession::new(ScriptedBackend::new());
        let mut window = ChatWindow::new();

        let result = session.ask("   \n\t ", &mut window).await;

        assert!(matches!(result, Err(ChatError::EmptyQuestion)));
        assert!(session.transcript().is_empty());
        assert!(session.backend().calls().is_empty());
        assert!(window.is_empty());
    }

    #[tokio::test]
    async fn test_follow_up_echo_and_fallback() {
        let mut session = ChatSession::new(ScriptedBackend::new().no_reply());
        let mut window = ChatWindow::new();

        let outcome = session.ask("  Morning or night?  ", &mut window).await.unwrap();

        assert_eq!(outcome, TurnOutcome::MissingReply);
        assert_eq!(window.messages()[0].text, "Morning or night?");
        assert_eq!(window.messages()[0].sender, Sender::User);
        assert_eq!(window.messages()[1].text, FOLLOW_UP_FALLBACK);
        assert_eq!(session.transcript().turns(), &[Turn::user("Morning or night?")]);
    }

    #[tokio::test]
    async fn test_transport_failure_not_replayed() {
        let mut session = ChatSession::new(ScriptedBackend::new().fail().reply("ok"));
        let mut window = ChatWindow::new();

        let first = session.ask("first", &mut window).await.unwrap();
        assert!(matches!(first, TurnOutcome::Failed(_)));
        assert_eq!(window.last().map(|m| m.text.as_str()), Some(CONNECTION_ERROR_MESSAGE));

        session.ask("second", &mut window).await.unwrap();
        let calls = session.backend().calls();
        assert_eq!(calls[1], vec![Turn::user("first"), Turn::user("second")]);
    }

    #[tokio::test]
    async fn test_second_payload_extends_first() {
        let products = sample_products();
        let mut session = ChatSession::new(ScriptedBackend::new().reply("routine").reply("answer"));
        let mut window = ChatWindow::new();

        session
            .generate_routine(&[&products[3]], &mut window)
            .await
            .unwrap();
        session.ask("How often?", &mut window).await.unwrap();

        let calls = session.backend().calls();
        assert_eq!(calls.len(), 2);
        let (first, second) = (&calls[0], &calls[1]);
        assert_eq!(&second[..first.len()], first.as_slice());
        assert_eq!(
            &second[first.len()..],
            &[Turn::bot("routine"), Turn::user("How often?")]
        );
        assert_eq!(session.transcript().len(), 4);
    }
}
