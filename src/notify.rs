//! Transient success/error notices.
//!
//! At most one notice is visible at a time. Publishing a notice replaces the
//! current one and supersedes its pending auto-clear, so a timer armed for an
//! older notice can never wipe a newer one.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

struct PendingClear {
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

struct Inner {
    state: watch::Sender<Option<Notice>>,
    clear_after: Duration,
    pending: Mutex<PendingClear>,
}

/// Shared notice board. Clones publish to the same board.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

impl Notifier {
    pub fn new(clear_after: Duration) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                state,
                clear_after,
                pending: Mutex::new(PendingClear {
                    generation: 0,
                    timer: None,
                }),
            }),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(Notice::Success(message.into()));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(Notice::Error(message.into()));
    }

    pub fn current(&self) -> Option<Notice> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Notice>> {
        self.inner.state.subscribe()
    }

    /// Drop the visible notice and any pending auto-clear.
    pub fn clear(&self) {
        let mut pending = self.inner.pending.lock();
        pending.generation += 1;
        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }
        self.inner.state.send_replace(None);
    }

    fn publish(&self, notice: Notice) {
        let mut pending = self.inner.pending.lock();
        pending.generation += 1;
        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }
        debug!(notice = ?notice, "Publishing notice");
        self.inner.state.send_replace(Some(notice));

        let generation = pending.generation;
        let clear_after = self.inner.clear_after;
        let weak = Arc::downgrade(&self.inner);
        pending.timer = Some(tokio::spawn(clear_later(weak, generation, clear_after)));
    }
}

// Holds only a weak reference so a torn-down board is not kept alive by its
// own timer.
async fn clear_later(inner: Weak<Inner>, generation: u64, clear_after: Duration) {
    tokio::time::sleep(clear_after).await;
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let mut pending = inner.pending.lock();
    if pending.generation == generation {
        pending.timer = None;
        inner.state.send_replace(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_notice_clears_after_delay() {
        let notifier = Notifier::new(Duration::from_secs(3));
        notifier.success("Order created");
        assert_eq!(notifier.current(), Some(Notice::Success("Order created".to_string())));

        sleep(Duration::from_millis(2_900)).await;
        assert!(notifier.current().is_some());

        sleep(Duration::from_millis(200)).await;
        assert_eq!(notifier.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_notice_is_not_cleared_by_older_timer() {
        let notifier = Notifier::new(Duration::from_secs(3));
        notifier.success("Order created");

        sleep(Duration::from_secs(2)).await;
        notifier.error("Failed to load orders");

        // The success timer would have fired at t=3s.
        sleep(Duration::from_millis(1_500)).await;
        assert_eq!(notifier.current(), Some(Notice::Error("Failed to load orders".to_string())));

        sleep(Duration::from_secs(2)).await;
        assert_eq!(notifier.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_and_error_are_exclusive() {
        let notifier = Notifier::new(Duration::from_secs(3));
        let mut updates = notifier.subscribe();

        notifier.error("Failed to create order");
        notifier.success("Order created");

        updates.changed().await.unwrap();
        let visible = updates.borrow_and_update().clone();
        assert_eq!(visible, Some(Notice::Success("Order created".to_string())));
        assert!(!visible.unwrap().is_error());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_cancels_pending_timer() {
        let notifier = Notifier::new(Duration::from_secs(1));
        notifier.error("boom");
        notifier.clear();
        assert_eq!(notifier.current(), None);

        notifier.success("later");
        sleep(Duration::from_millis(500)).await;
        assert_eq!(notifier.current().map(|n| n.message().to_string()), Some("later".to_string()));
    }
}
