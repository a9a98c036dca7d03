//! Request lifecycle driver

use std::sync::Arc;

use folio_client::Transport;
use tokio::sync::mpsc;

use crate::{
    events::ChatEvent,
    handle::ChatHandle,
    widget::{
        ChatWidget, DEFAULT_GREETING, PendingRequest, Rejection, ReplyPolicy, RequestId,
        Settlement,
    },
};

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Assistant turn the transcript is seeded with
    pub greeting: String,
    /// What to do with answers that carry no reply
    pub reply_policy: ReplyPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            reply_policy: ReplyPolicy::default(),
        }
    }
}

/// Owns one chat widget and the requests it issues.
///
/// Requests run on spawned tasks and report back through the event channel
/// returned by [`ChatSession::new`]; the owner feeds those events into
/// [`ChatSession::apply`] so every state change happens on the owner's task.
/// Dropping the session cancels anything still in flight.
pub struct ChatSession {
    widget: ChatWidget,
    transport: Arc<dyn Transport>,
    handle: ChatHandle,
    event_tx: mpsc::UnboundedSender<ChatEvent>,
}

impl ChatSession {
    /// Create a session and the receiver its request events arrive on
    pub fn new(
        config: SessionConfig,
        transport: Arc<dyn Transport>,
    ) -> (Self, mpsc::UnboundedReceiver<ChatEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let session = Self {
            widget: ChatWidget::new(config.greeting, config.reply_policy),
            transport,
            handle: ChatHandle::new(),
            event_tx,
        };
        (session, event_rx)
    }

    pub fn widget(&self) -> &ChatWidget {
        &self.widget
    }

    /// Get a cloneable handle for cancelling from external code
    pub fn handle(&self) -> ChatHandle {
        self.handle.clone()
    }

    pub fn toggle_panel(&mut self) {
        self.widget.toggle_panel();
    }

    pub fn update_input(&mut self, text: impl Into<String>) {
        self.widget.update_input(text);
    }

    pub fn take_scroll_request(&mut self) -> bool {
        self.widget.take_scroll_request()
    }

    /// Submit the current input and issue the request.
    ///
    /// Must be called inside a tokio runtime.
    pub fn submit(&mut self) -> Result<RequestId, Rejection> {
        let PendingRequest { id, content } = self.widget.begin_submit()?;
        tracing::debug!(id, "submitting chat message");

        let token = self.handle.begin(id);
        let transport = Arc::clone(&self.transport);
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let _ = event_tx.send(ChatEvent::RequestStarted { id });

            let result = tokio::select! {
                biased;
                _ = token.cancelled() => Err(folio_client::Error::Cancelled),
                result = transport.send(&content) => result,
            };

            if let Err(e) = &result {
                if !e.is_cancelled() {
                    tracing::error!(id, error = %e, "chat request failed");
                }
            }

            // The receiver is gone once the session owner has shut down
            let _ = event_tx.send(ChatEvent::Settled {
                id,
                settlement: Settlement::from(result),
            });
        });

        Ok(id)
    }

    /// Abort the in-flight request.
    ///
    /// The turn is settled immediately with a cancellation notice; the
    /// request's own settlement arrives later and is discarded as stale.
    pub fn abort(&mut self) -> bool {
        let Some(id) = self.handle.abort() else {
            return false;
        };
        tracing::info!(id, "chat request aborted");
        self.widget.resolve_cancelled(id)
    }

    /// Apply an event from the channel. Returns true if the transcript changed.
    pub fn apply(&mut self, event: ChatEvent) -> bool {
        match event {
            ChatEvent::RequestStarted { id } => {
                tracing::debug!(id, "chat request started");
                false
            }
            ChatEvent::Settled { id, settlement } => {
                self.handle.finish(id);
                let before = self.widget.messages().len();
                if !self.widget.settle(id, settlement) {
                    tracing::warn!(id, "discarding settlement for a request that is no longer pending");
                    return false;
                }
                tracing::debug!(id, "chat request settled");
                self.widget.messages().len() != before
            }
        }
    }

    /// Wait for the pending request to settle, applying events as they arrive.
    ///
    /// Returns immediately when nothing is pending.
    pub async fn wait_settled(&mut self, events: &mut mpsc::UnboundedReceiver<ChatEvent>) {
        while self.widget.awaiting_reply() {
            match events.recv().await {
                Some(event) => {
                    self.apply(event);
                }
                None => break,
            }
        }
    }

    /// Cancel everything in flight. Later settlements are never applied.
    pub fn shutdown(&self) {
        self.handle.shutdown();
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use folio_client::{Message, Role};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    /// Canned answers for the mock transport
    enum Canned {
        Reply(&'static str),
        Missing,
        Offline,
        Hang,
    }

    /// A mock transport that answers from a script.
    struct MockTransport {
        script: Mutex<Vec<Canned>>,
        sent: Mutex<Vec<String>>,
        completed: AtomicBool,
    }

    impl MockTransport {
        fn new(script: Vec<Canned>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script),
                sent: Mutex::new(Vec::new()),
                completed: AtomicBool::new(false),
            })
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, message: &str) -> folio_client::Result<String> {
            self.sent.lock().push(message.to_string());
            let next = {
                let mut script = self.script.lock();
                if script.is_empty() {
                    Canned::Reply("done")
                } else {
                    script.remove(0)
                }
            };
            let result = match next {
                Canned::Reply(text) => Ok(text.to_string()),
                Canned::Missing => Err(folio_client::Error::MissingReply),
                Canned::Offline => Err(folio_client::Error::Status {
                    status: 503,
                    body: "offline".to_string(),
                }),
                Canned::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok("too late".to_string())
                }
            };
            self.completed.store(true, Ordering::SeqCst);
            result
        }
    }

    fn session_with(
        transport: Arc<MockTransport>,
        reply_policy: ReplyPolicy,
    ) -> (ChatSession, mpsc::UnboundedReceiver<ChatEvent>) {
        let config = SessionConfig {
            greeting: "hello there".to_string(),
            reply_policy,
        };
        ChatSession::new(config, transport)
    }

    #[tokio::test]
    async fn test_submit_and_reply() {
        let transport = MockTransport::new(vec![Canned::Reply("hello")]);
        let (mut session, mut events) = session_with(transport.clone(), ReplyPolicy::Surface);

        session.update_input("hi");
        session.submit().unwrap();
        // User turn is visible before the reply arrives
        assert_eq!(session.widget().messages().last(), Some(&Message::user("hi")));
        assert!(session.widget().awaiting_reply());

        session.wait_settled(&mut events).await;

        assert!(!session.widget().awaiting_reply());
        assert_eq!(
            session.widget().messages(),
            &[
                Message::assistant("hello there"),
                Message::user("hi"),
                Message::assistant("hello"),
            ]
        );
        assert_eq!(*transport.sent.lock(), vec!["hi".to_string()]);
    }

    #[tokio::test]
    async fn test_failure_surfaces_sys_err() {
        let transport = MockTransport::new(vec![Canned::Offline]);
        let (mut session, mut events) = session_with(transport, ReplyPolicy::Surface);

        session.update_input("hi");
        session.submit().unwrap();
        session.wait_settled(&mut events).await;

        let last = session.widget().messages().last().unwrap();
        assert_eq!(last.role(), Role::Assistant);
        assert!(last.content().starts_with("SYS_ERR: "));
        assert!(last.content().contains("503"));
        assert!(!session.widget().awaiting_reply());
    }

    #[tokio::test]
    async fn test_missing_reply_respects_policy() {
        let transport = MockTransport::new(vec![Canned::Missing]);
        let (mut session, mut events) = session_with(transport, ReplyPolicy::Ignore);

        session.update_input("hi");
        session.submit().unwrap();
        session.wait_settled(&mut events).await;

        assert_eq!(session.widget().messages().last(), Some(&Message::user("hi")));
        assert!(!session.widget().awaiting_reply());
    }

    #[tokio::test]
    async fn test_second_submit_rejected_while_awaiting() {
        let transport = MockTransport::new(vec![Canned::Hang]);
        let (mut session, _events) = session_with(transport.clone(), ReplyPolicy::Surface);

        session.update_input("first");
        session.submit().unwrap();
        session.update_input("second");
        assert_eq!(session.submit(), Err(Rejection::AwaitingReply));

        tokio::task::yield_now().await;
        assert!(transport.sent.lock().len() <= 1);
    }

    #[tokio::test]
    async fn test_abort_settles_immediately_and_discards_late_event() {
        let transport = MockTransport::new(vec![Canned::Hang]);
        let (mut session, mut events) = session_with(transport.clone(), ReplyPolicy::Surface);

        session.update_input("hi");
        let id = session.submit().unwrap();
        assert!(session.abort());
        assert!(!session.widget().awaiting_reply());
        assert_eq!(
            session.widget().messages().last(),
            Some(&Message::assistant("SYS_ERR: request cancelled"))
        );
        assert!(!session.abort());

        // The task still reports, but the turn is already settled
        let len = session.widget().messages().len();
        loop {
            let event = events.recv().await.unwrap();
            let terminal = event.is_terminal();
            assert_eq!(event.request_id(), id);
            assert!(!session.apply(event));
            if terminal {
                break;
            }
        }
        assert_eq!(session.widget().messages().len(), len);
        assert!(!transport.completed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_drop_cancels_in_flight_request() {
        let transport = MockTransport::new(vec![Canned::Hang]);
        let (mut session, mut events) = session_with(transport.clone(), ReplyPolicy::Surface);
        let handle = session.handle();

        session.update_input("hi");
        let id = session.submit().unwrap();
        drop(session);
        assert!(handle.is_shut_down());

        let mut settled = None;
        while let Some(event) = events.recv().await {
            if let ChatEvent::Settled { id, settlement } = event {
                settled = Some((id, settlement));
            }
        }
        assert_eq!(settled, Some((id, Settlement::Cancelled)));
        assert!(!transport.completed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_toggle_does_not_cancel() {
        let transport = MockTransport::new(vec![Canned::Reply("still here")]);
        let (mut session, mut events) = session_with(transport, ReplyPolicy::Surface);

        session.toggle_panel();
        session.update_input("hi");
        session.submit().unwrap();
        session.toggle_panel();
        assert!(!session.widget().panel_open());

        session.wait_settled(&mut events).await;
        assert_eq!(
            session.widget().messages().last(),
            Some(&Message::assistant("still here"))
        );
    }

    #[tokio::test]
    async fn test_sequential_conversation() {
        let transport = MockTransport::new(vec![
            Canned::Reply("one"),
            Canned::Offline,
            Canned::Reply("three"),
        ]);
        let (mut session, mut events) = session_with(transport, ReplyPolicy::Surface);

        for text in ["a", "b", "c"] {
            session.update_input(text);
            session.submit().unwrap();
            session.wait_settled(&mut events).await;
        }

        let contents: Vec<&str> = session
            .widget()
            .messages()
            .iter()
            .skip(1)
            .map(|m| m.content())
            .collect();
        assert_eq!(contents[0], "a");
        assert_eq!(contents[1], "one");
        assert_eq!(contents[2], "b");
        assert!(contents[3].starts_with("SYS_ERR: "));
        assert_eq!(contents[4], "c");
        assert_eq!(contents[5], "three");
    }
}
