//! Transport abstraction for reaching the chat service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::{
    endpoint::Endpoint,
    error::{Error, Result},
    types::{ChatRequest, parse_reply},
};

/// Longest slice of an error body kept in [`Error::Status`]
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Sends one user message and yields the assistant reply
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a message. One call is one request; nothing is retried.
    async fn send(&self, message: &str) -> Result<String>;
}

/// Transport that POSTs JSON to `<base-url>/api/chat`
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Endpoint,
}

impl HttpTransport {
    /// Create a transport with the HTTP client's default timeouts
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Create a transport with an overall request timeout
    pub fn with_timeout(endpoint: Endpoint, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, message: &str) -> Result<String> {
        let url = self.endpoint.chat_url();
        tracing::debug!(%url, chars = message.chars().count(), "posting chat message");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(&ChatRequest { message })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // A reply wins regardless of status. A JSON body without one is a
        // missing reply even on a failing status; only a failing status with
        // an unparseable body is a transport failure.
        let truncated = || -> String { body.chars().take(MAX_ERROR_BODY_CHARS).collect() };
        match parse_reply(&body) {
            Ok(Some(reply)) => Ok(reply),
            Ok(None) if !status.is_success() => Err(Error::StatusWithoutReply {
                status: status.as_u16(),
                body: truncated(),
            }),
            Ok(None) => Err(Error::MissingReply),
            Err(_) if !status.is_success() => Err(Error::Status {
                status: status.as_u16(),
                body: truncated(),
            }),
            Err(e) => Err(e),
        }
    }
}
