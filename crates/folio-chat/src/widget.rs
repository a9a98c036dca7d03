//! Chat widget state container
//!
//! Every transition here is synchronous and free of I/O, so the whole request
//! lifecycle can be driven and inspected without a terminal or a network.

use folio_client::Message;
use serde::{Deserialize, Serialize};

/// Assistant turn the transcript starts with
pub const DEFAULT_GREETING: &str = "SYSTEM ONLINE. I am Saad's AI. Ask about his MERN stack \
architecture, technical experience, or projects.";

/// Identifies one submitted request
pub type RequestId = u64;

/// What to do when the service answers without a usable reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyPolicy {
    /// Append a `SYS_ERR:` turn, same as a network failure
    #[default]
    Surface,
    /// Append nothing
    Ignore,
}

/// Why a submission was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// Input was empty or whitespace only
    #[error("message is empty")]
    EmptyInput,
    /// A request is already in flight
    #[error("still waiting for the previous reply")]
    AwaitingReply,
}

/// The request issued by an accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: RequestId,
    /// Outgoing text, exactly as typed
    pub content: String,
}

/// Terminal outcome of one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Settlement {
    /// The service answered with a reply
    Reply { text: String },
    /// The service answered but the body was unusable
    MissingReply { description: String },
    /// The request never got a usable answer
    Failed { description: String },
    /// The request was cancelled
    Cancelled,
}

impl From<folio_client::Result<String>> for Settlement {
    fn from(result: folio_client::Result<String>) -> Self {
        match result {
            Ok(text) => Settlement::Reply { text },
            Err(e) if e.is_cancelled() => Settlement::Cancelled,
            Err(e) if e.is_malformed() => Settlement::MissingReply {
                description: e.to_string(),
            },
            Err(e) => Settlement::Failed {
                description: e.to_string(),
            },
        }
    }
}

/// Conversation state owned by one widget instance
#[derive(Debug, Clone)]
pub struct ChatWidget {
    panel_open: bool,
    messages: Vec<Message>,
    input: String,
    pending: Option<PendingRequest>,
    next_request_id: RequestId,
    scroll_requested: bool,
    reply_policy: ReplyPolicy,
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING, ReplyPolicy::default())
    }
}

impl ChatWidget {
    /// Create a widget seeded with one assistant greeting
    pub fn new(greeting: impl Into<String>, reply_policy: ReplyPolicy) -> Self {
        Self {
            panel_open: false,
            messages: vec![Message::assistant(greeting)],
            input: String::new(),
            pending: None,
            next_request_id: 1,
            scroll_requested: false,
            reply_policy,
        }
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    /// The transcript, in display order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn awaiting_reply(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingRequest> {
        self.pending.as_ref()
    }

    pub fn reply_policy(&self) -> ReplyPolicy {
        self.reply_policy
    }

    /// Whether submit() would currently be accepted
    pub fn can_submit(&self) -> bool {
        self.pending.is_none() && !self.input.trim().is_empty()
    }

    /// Flip panel visibility. Never touches the transcript.
    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
        if self.panel_open {
            self.scroll_requested = true;
        }
    }

    /// Replace the input buffer verbatim
    pub fn update_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Start a submission.
    ///
    /// On success the user turn is already in the transcript and the caller
    /// is expected to issue the returned request.
    pub fn begin_submit(&mut self) -> Result<PendingRequest, Rejection> {
        if self.input.trim().is_empty() {
            return Err(Rejection::EmptyInput);
        }
        if self.pending.is_some() {
            return Err(Rejection::AwaitingReply);
        }

        let content = std::mem::take(&mut self.input);
        self.push(Message::user(content.clone()));

        let request = PendingRequest {
            id: self.next_request_id,
            content,
        };
        self.next_request_id += 1;
        self.pending = Some(request.clone());
        Ok(request)
    }

    /// Settle the pending request with a reply
    pub fn resolve_success(&mut self, id: RequestId, reply: impl Into<String>) -> bool {
        if !self.finish(id) {
            return false;
        }
        self.push(Message::assistant(reply));
        true
    }

    /// Settle the pending request with a transport failure
    pub fn resolve_failure(&mut self, id: RequestId, description: &str) -> bool {
        if !self.finish(id) {
            return false;
        }
        self.push(Message::system_error(description));
        true
    }

    /// Settle the pending request whose answer had no usable reply.
    ///
    /// Whether a turn is appended depends on the reply policy.
    pub fn resolve_missing_reply(&mut self, id: RequestId, description: &str) -> bool {
        if !self.finish(id) {
            return false;
        }
        if self.reply_policy == ReplyPolicy::Surface {
            self.push(Message::system_error(description));
        }
        true
    }

    /// Settle the pending request as cancelled by the user
    pub fn resolve_cancelled(&mut self, id: RequestId) -> bool {
        if !self.finish(id) {
            return false;
        }
        self.push(Message::system_error(folio_client::Error::Cancelled));
        true
    }

    /// Apply a settlement. Returns false when `id` is not the pending request.
    pub fn settle(&mut self, id: RequestId, settlement: Settlement) -> bool {
        match settlement {
            Settlement::Reply { text } => self.resolve_success(id, text),
            Settlement::MissingReply { description } => {
                self.resolve_missing_reply(id, &description)
            }
            Settlement::Failed { description } => self.resolve_failure(id, &description),
            Settlement::Cancelled => self.resolve_cancelled(id),
        }
    }

    /// Consume a pending scroll-to-latest request
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    fn finish(&mut self, id: RequestId) -> bool {
        match &self.pending {
            Some(pending) if pending.id == id => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message);
        if self.panel_open {
            self.scroll_requested = true;
        }
    }
}
