//! folio-client: HTTP client for the portfolio chat service
//!
//! This crate holds the wire types, the error taxonomy and the `Transport`
//! seam the chat widget uses to reach the remote `/api/chat` endpoint.

pub mod endpoint;
pub mod error;
pub mod transport;
pub mod types;

pub use endpoint::{CHAT_PATH, DEFAULT_BASE_URL, Endpoint};
pub use error::{Error, Result};
pub use transport::{HttpTransport, Transport};
pub use types::*;
