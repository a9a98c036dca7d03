//! Error types for folio-client

use thiserror::Error;

/// Result type alias using folio-client Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the chat service
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (connect, DNS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not JSON
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    /// Server answered with a non-success status and a body that is not JSON
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Server answered with a non-success status and a JSON body without a reply
    #[error("server returned {status} without a reply: {body}")]
    StatusWithoutReply { status: u16, body: String },

    /// Response parsed but carried no usable `reply`
    #[error("response did not contain a reply")]
    MissingReply,

    /// Request was cancelled before it settled
    #[error("request cancelled")]
    Cancelled,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Whether the server answered but the body had no usable reply.
    ///
    /// These are the cases the reply policy decides on; everything else is a
    /// transport failure.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::Json(_) | Error::MissingReply | Error::StatusWithoutReply { .. }
        )
    }

    /// Whether this error came from cancellation rather than the network
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}
