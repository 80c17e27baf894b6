//! Remote chat endpoint.

use std::future::Future;
use std::pin::Pin;

use url::Url;

use super::error::{ChatError, ChatResult};
use super::types::{ChatRequest, ChatResponse, Turn};
use crate::config::PickerConfig;

/// Boxed future type for backend calls.
pub type ChatFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Opaque request/response chat service.
pub trait ChatBackend: Send + Sync {
    /// Send the whole transcript and return the parsed response.
    ///
    /// # Errors
    /// Returns an error on network failure or an unparsable body.
    fn send<'a>(&'a self, history: &'a [Turn]) -> ChatFuture<'a, ChatResult<ChatResponse>>;
}

/// POSTs `{ "history": [...] }` as JSON to the chat endpoint.
pub struct HttpChatBackend {
    client: reqwest::Client,
    url: Url,
}

impl HttpChatBackend {
    /// Create a backend for an explicit endpoint URL.
    #[must_use]
    pub const fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    /// Create a backend from the configured base URL and chat path.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn from_config(config: &PickerConfig) -> ChatResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ChatError::HttpClient(e.to_string()))?;
        Ok(Self::new(client, config.chat_url()?))
    }

    /// Endpoint URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl ChatBackend for HttpChatBackend {
    fn send<'a>(&'a self, history: &'a [Turn]) -> ChatFuture<'a, ChatResult<ChatResponse>> {
        Box::pin(async move {
            tracing::debug!("POST {} with {} turns", self.url, history.len());
            let response = self
                .client
                .post(self.url.clone())
                .json(&ChatRequest { history })
                .send()
                .await?;

            // The body is parsed whatever the status; a missing reply is handled upstream.
            let status = response.status();
            if !status.is_success() {
                tracing::warn!("Chat endpoint returned status {status}");
            }

            let text = response.text().await?;
            Ok(serde_json::from_str(&text)?)
        })
    }
}
