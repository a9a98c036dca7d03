//! folio-chat: Chat widget state and request lifecycle
//!
//! `ChatWidget` is the state container with pure transitions; `ChatSession`
//! drives it, issuing one request per accepted submission and feeding the
//! settlement back in.

pub mod events;
pub mod handle;
pub mod session;
pub mod widget;

pub use events::ChatEvent;
pub use handle::ChatHandle;
pub use session::{ChatSession, SessionConfig};
pub use widget::{
    ChatWidget, DEFAULT_GREETING, PendingRequest, Rejection, ReplyPolicy, RequestId, Settlement,
};
