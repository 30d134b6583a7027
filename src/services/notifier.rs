//! User-facing error notifications
//!
//! The core never shows dialogs itself. It hands a title and a message to a
//! `Notifier`; the terminal front-end queues them as modal popups and tests
//! record them.

use std::collections::VecDeque;
use std::sync::Mutex;

/// Title used for every notification the explorer raises
pub const NOTIFICATION_TITLE: &str = "File Explorer";

/// A single error notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

/// Capability to show an error to the user
pub trait Notifier: Send + Sync {
    fn error(&self, title: &str, message: &str);
}

/// Keeps notifications until the UI dismisses them, oldest first.
///
/// Every notification is also written to the log.
#[derive(Debug, Default)]
pub struct QueuedNotifier {
    pending: Mutex<VecDeque<Notification>>,
}

impl QueuedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The notification currently shown, if any
    pub fn current(&self) -> Option<Notification> {
        self.lock().front().cloned()
    }

    /// Dismiss the notification currently shown
    pub fn dismiss(&self) -> Option<Notification> {
        self.lock().pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Notification>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for QueuedNotifier {
    fn error(&self, title: &str, message: &str) {
        tracing::warn!("{title}: {message}");
        self.lock().push_back(Notification::new(title, message));
    }
}

/// Records every notification, for tests
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn count(&self) -> usize {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether any message contains `needle`
    pub fn any_contains(&self, needle: &str) -> bool {
        self.notifications()
            .iter()
            .any(|n| n.message.contains(needle))
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, title: &str, message: &str) {
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Notification::new(title, message));
    }
}
