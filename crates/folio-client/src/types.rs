//! Transcript and wire types

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Prefix carried by every synthesized error turn
pub const SYS_ERR_PREFIX: &str = "SYS_ERR: ";

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn of the transcript. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Create a synthesized assistant error turn
    pub fn system_error(description: impl std::fmt::Display) -> Self {
        Self::assistant(format!("{SYS_ERR_PREFIX}{description}"))
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether this turn was synthesized from a failure
    pub fn is_error(&self) -> bool {
        self.role == Role::Assistant && self.content.starts_with(SYS_ERR_PREFIX)
    }
}

/// Request body for `POST /api/chat`
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Extract the reply from a response body.
///
/// Returns `Ok(None)` when the body is JSON but has no non-empty string
/// `reply` field, and an error when the body is not JSON at all.
pub fn parse_reply(body: &str) -> Result<Option<String>> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    Ok(value
        .get("reply")
        .and_then(serde_json::Value::as_str)
        .filter(|reply| !reply.is_empty())
        .map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(ChatRequest { message: "hi" }).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "hi" }));
    }

    #[test]
    fn test_parse_reply_present() {
        assert_eq!(
            parse_reply(r#"{"reply":"hello"}"#).unwrap(),
            Some("hello".to_string())
        );
    }

    #[test]
    fn test_parse_reply_absent_or_unusable() {
        assert_eq!(parse_reply("{}").unwrap(), None);
        assert_eq!(parse_reply(r#"{"reply":""}"#).unwrap(), None);
        assert_eq!(parse_reply(r#"{"reply":42}"#).unwrap(), None);
        assert_eq!(parse_reply("[1,2]").unwrap(), None);
        assert_eq!(parse_reply("null").unwrap(), None);
    }

    #[test]
    fn test_parse_reply_not_json() {
        assert!(parse_reply("<html>Bad Gateway</html>").is_err());
        assert!(parse_reply("").is_err());
    }

    #[test]
    fn test_system_error_message() {
        let msg = Message::system_error("connection refused");
        assert_eq!(msg.role(), Role::Assistant);
        assert_eq!(msg.content(), "SYS_ERR: connection refused");
        assert!(msg.is_error());
        assert!(!Message::assistant("hello").is_error());
        assert!(!Message::user("SYS_ERR: typed by a guest").is_error());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }
}
