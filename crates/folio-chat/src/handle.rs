//! A cloneable handle for cancelling chat requests from outside the session.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::widget::RequestId;

/// Cancellation handle tied to one session's lifetime.
///
/// Every request runs under a child of the root token, so shutting the
/// session down cancels whatever is still in flight.
#[derive(Clone)]
pub struct ChatHandle {
    root: CancellationToken,
    current: Arc<Mutex<Option<(RequestId, CancellationToken)>>>,
}

impl ChatHandle {
    pub(crate) fn new() -> Self {
        Self {
            root: CancellationToken::new(),
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Register a new in-flight request and return its token.
    pub(crate) fn begin(&self, id: RequestId) -> CancellationToken {
        let token = self.root.child_token();
        *self.current.lock() = Some((id, token.clone()));
        token
    }

    /// Forget the in-flight request if it is `id`.
    pub(crate) fn finish(&self, id: RequestId) {
        let mut current = self.current.lock();
        if matches!(*current, Some((current_id, _)) if current_id == id) {
            *current = None;
        }
    }

    /// Cancel the in-flight request, returning its id.
    pub fn abort(&self) -> Option<RequestId> {
        let (id, token) = self.current.lock().take()?;
        token.cancel();
        Some(id)
    }

    /// Cancel everything this session ever started.
    pub fn shutdown(&self) {
        self.current.lock().take();
        self.root.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.root.is_cancelled()
    }

    /// Id of the request currently in flight
    pub fn in_flight(&self) -> Option<RequestId> {
        self.current.lock().as_ref().map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abort_cancels_current() {
        let handle = ChatHandle::new();
        let token = handle.begin(1);
        assert_eq!(handle.in_flight(), Some(1));

        assert_eq!(handle.abort(), Some(1));
        assert!(token.is_cancelled());
        assert_eq!(handle.in_flight(), None);
        assert_eq!(handle.abort(), None);
        assert!(!handle.is_shut_down());
    }

    #[test]
    fn test_finish_ignores_other_ids() {
        let handle = ChatHandle::new();
        handle.begin(2);
        handle.finish(1);
        assert_eq!(handle.in_flight(), Some(2));
        handle.finish(2);
        assert_eq!(handle.in_flight(), None);
    }

    #[test]
    fn test_shutdown_cancels_children() {
        let handle = ChatHandle::new();
        let token = handle.begin(1);
        let clone = handle.clone();

        clone.shutdown();
        assert!(token.is_cancelled());
        assert!(handle.is_shut_down());
        assert!(handle.begin(2).is_cancelled());
    }
}
