//! Chat service address resolution

use crate::error::{Error, Result};

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Path of the chat endpoint, relative to the base URL
pub const CHAT_PATH: &str = "/api/chat";

/// Root address of the remote chat service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
}

impl Endpoint {
    /// Create an endpoint from a base URL.
    ///
    /// Trailing slashes are trimmed; the URL must be http or https.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let trimmed = base_url.as_ref().trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::InvalidConfig("base URL is empty".to_string()));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(Error::InvalidConfig(format!(
                "base URL must start with http:// or https://, got {trimmed}"
            )));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Pick the first non-blank candidate, falling back to [`DEFAULT_BASE_URL`].
    ///
    /// Candidates are given highest priority first.
    pub fn resolve<I>(candidates: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let chosen = candidates
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.trim().is_empty());
        match chosen {
            Some(url) => Self::new(url),
            None => Ok(Self::default()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the chat endpoint
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.base_url, CHAT_PATH)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
