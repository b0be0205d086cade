//! Single-slot, replay-latest notification channel.
//!
//! The channel holds at most one pending [`EventNotification`]. Emitting
//! overwrites whatever is pending (last write wins); subscribers always see the
//! latest value, including subscribers that arrive after the emission. The
//! presentation layer clears the slot once a notification has been shown.

use super::notification::{EventNotification, NotificationId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Cloneable handle to the notification slot.
///
/// Clones share the same slot, so producers on other threads can emit; the
/// most recent emission always wins.
#[derive(Debug, Clone)]
pub struct EventChannel {
    slot: Arc<watch::Sender<Option<EventNotification>>>,
    next_id: Arc<AtomicU64>,
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl EventChannel {
    /// Creates an empty channel.
    #[must_use]
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot: Arc::new(slot),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Stores `notification`, replacing any pending one, and returns its id.
    pub fn emit(&self, mut notification: EventNotification) -> NotificationId {
        let id = NotificationId(self.next_id.fetch_add(1, Ordering::Relaxed));
        notification.id = id;

        tracing::debug!(
            notification_id = %id,
            kind = ?notification.kind,
            message = %notification.message,
            "notification emitted"
        );

        if let Some(previous) = self.slot.send_replace(Some(notification)) {
            tracing::debug!(preempted = %previous.id, by = %id, "pending notification replaced");
        }
        id
    }

    /// Clears the slot if it still holds notification `id`.
    ///
    /// Returns the consumed notification, or `None` when a newer emission has
    /// already replaced it (the newer one stays pending).
    pub fn consume_and_clear(&self, id: NotificationId) -> Option<EventNotification> {
        let mut consumed = None;
        self.slot.send_if_modified(|slot| {
            if slot.as_ref().is_some_and(|pending| pending.id == id) {
                consumed = slot.take();
                true
            } else {
                false
            }
        });

        if consumed.is_none() {
            tracing::debug!(notification_id = %id, "stale notification outcome ignored");
        }
        consumed
    }

    /// Notification currently pending, if any.
    #[must_use]
    pub fn current(&self) -> Option<EventNotification> {
        self.slot.borrow().clone()
    }

    /// Subscribes to the slot; the watcher starts at the current value.
    #[must_use]
    pub fn subscribe(&self) -> NotificationWatcher {
        NotificationWatcher {
            receiver: self.slot.subscribe(),
        }
    }
}

/// Receiving end of the notification slot.
#[derive(Debug)]
pub struct NotificationWatcher {
    receiver: watch::Receiver<Option<EventNotification>>,
}

impl NotificationWatcher {
    /// Latest slot value.
    #[must_use]
    pub fn latest(&self) -> Option<EventNotification> {
        self.receiver.borrow().clone()
    }

    /// Returns the slot value if it changed since the last call.
    ///
    /// `Some(None)` means the slot was cleared.
    pub fn changed(&mut self) -> Option<Option<EventNotification>> {
        match self.receiver.has_changed() {
            Ok(true) => Some(self.receiver.borrow_and_update().clone()),
            Ok(false) | Err(_) => None,
        }
    }
}
