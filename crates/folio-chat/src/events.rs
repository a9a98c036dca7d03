//! Chat event types

use serde::{Deserialize, Serialize};

use crate::widget::{RequestId, Settlement};

/// Events emitted by in-flight requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// The request task started talking to the service
    RequestStarted { id: RequestId },

    /// The request reached a terminal state
    Settled {
        id: RequestId,
        settlement: Settlement,
    },
}

impl ChatEvent {
    /// Check if this is a terminal event
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChatEvent::Settled { .. })
    }

    pub fn request_id(&self) -> RequestId {
        match self {
            ChatEvent::RequestStarted { id } | ChatEvent::Settled { id, .. } => *id,
        }
    }
}
