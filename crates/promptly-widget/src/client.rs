//! Conversation client.
//!
//! One JSON POST per user message. The conversation identifier is read from
//! the cookie store before every request and written back after every
//! successful response.

use async_trait::async_trait;
use chrono::Duration;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::cookie::{CookieStore, CHAT_ID_COOKIE, CHAT_ID_TTL_DAYS};

/// Path of the conversation endpoint.
pub const CONVERSATION_PATH: &str = "/conversation";

/// Request body for the conversation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}

/// Response body from the conversation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub message: String,
    pub chat_id: String,
}

/// Errors that can occur during an exchange.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the connection failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Server responded with status {0}")]
    Status(u16),

    /// The response body was not the expected JSON.
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Sends a conversation request and returns the server's reply.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: &ConversationRequest) -> Result<ConversationResponse, ClientError>;
}

/// [`Transport`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    /// Create a transport posting to `{base_url}/conversation`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            url: endpoint_url(base_url),
        }
    }

    /// Full endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: &ConversationRequest) -> Result<ConversationResponse, ClientError> {
        let response = self.client.post(&self.url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Join a base URL and the conversation path.
pub fn endpoint_url(base_url: &str) -> String {
    format!("{}{CONVERSATION_PATH}", base_url.trim_end_matches('/'))
}

/// Build the request for `message`, attaching the stored identifier.
pub fn build_request(store: &dyn CookieStore, cookie_name: &str, message: &str) -> ConversationRequest {
    ConversationRequest {
        message: message.to_string(),
        chat_id: store.get(cookie_name),
    }
}

/// Store the identifier from a successful response.
pub fn remember_chat_id(
    store: &mut dyn CookieStore,
    cookie_name: &str,
    response: &ConversationResponse,
    ttl: Duration,
) {
    store.set(cookie_name, &response.chat_id, Some(ttl));
}

/// Client tying a [`Transport`] to a [`CookieStore`].
pub struct ConversationClient<T, S> {
    transport: T,
    store: S,
    cookie_name: String,
    ttl: Duration,
}

impl<T: Transport, S: CookieStore> ConversationClient<T, S> {
    /// Create a client with the default cookie name and lifetime.
    pub fn new(transport: T, store: S) -> Self {
        Self {
            transport,
            store,
            cookie_name: CHAT_ID_COOKIE.to_string(),
            ttl: Duration::days(CHAT_ID_TTL_DAYS),
        }
    }

    /// Use a different cookie name.
    #[must_use]
    pub fn cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Use a different cookie lifetime.
    #[must_use]
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Current conversation identifier, if any.
    pub fn chat_id(&self) -> Option<String> {
        self.store.get(&self.cookie_name)
    }

    /// Forget the current conversation.
    pub fn reset(&mut self) {
        self.store.remove(&self.cookie_name);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Send one message. On failure the stored identifier is left as is.
    pub async fn send(&mut self, message: &str) -> Result<ConversationResponse, ClientError> {
        let request = build_request(&self.store, &self.cookie_name, message);
        debug!(has_chat_id = request.chat_id.is_some(), "sending conversation request");

        match self.transport.post(&request).await {
            Ok(response) => {
                remember_chat_id(&mut self.store, &self.cookie_name, &response, self.ttl);
                Ok(response)
            }
            Err(e) => {
                warn!(error = %e, "conversation request failed");
                Err(e)
            }
        }
    }
}
