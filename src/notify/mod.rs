//! User-facing notification queue.
//!
//! Notifications are ordered, carry a monotonic key, and auto-dismiss after a
//! configurable duration. The key (not the message text) identifies a
//! notification, so duplicate messages dismiss independently. While the Auto
//! compile mode is active the queue is suppressed and `push` becomes an
//! observable no-op.

use serde::Serialize;

/// A single queued notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Position-stable display id (index at insertion time).
    pub id: usize,
    /// Unique identity. Monotonic across the session, never reused,
    /// survives `clear`.
    pub key: u64,
    pub message: String,
    /// Auto-dismiss delay in milliseconds.
    pub dismiss_after_ms: u64,
}

/// Ordered, dismissible-by-key notification list.
#[derive(Debug)]
pub struct NotificationQueue {
    items: Vec<Notification>,
    next_key: u64,
    suppressed: bool,
    dismiss_after_ms: u64,
}

impl NotificationQueue {
    pub fn new(dismiss_after_ms: u64) -> Self {
        Self {
            items: Vec::new(),
            next_key: 0,
            suppressed: false,
            dismiss_after_ms,
        }
    }

    /// Append a notification, returning its key.
    ///
    /// Returns `None` while suppressed; nothing is queued and no key is
    /// consumed.
    pub fn push(&mut self, message: impl Into<String>) -> Option<u64> {
        if self.suppressed {
            return None;
        }

        let key = self.next_key;
        self.next_key += 1;
        self.items.push(Notification {
            id: self.items.len(),
            key,
            message: message.into(),
            dismiss_after_ms: self.dismiss_after_ms,
        });
        Some(key)
    }

    /// Remove the notification with the given key. Idempotent.
    pub fn dismiss(&mut self, key: u64) {
        self.items.retain(|n| n.key != key);
    }

    /// Drop every queued notification. The key counter is not reset.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Suppress or re-enable queuing (Auto mode suppresses).
    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
