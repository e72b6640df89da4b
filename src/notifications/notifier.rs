//! Delivery of notifications to the user.
//!
//! Delivery is fire-and-forget: a notifier never blocks the caller and never
//! reports back whether the user saw the message.

use super::models::{Notification, NotificationLevel};
use std::sync::Mutex;
use tracing::{error, info};

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the tracing log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        let description = notification.description.as_deref().unwrap_or("");
        match notification.level {
            NotificationLevel::Success => info!("{} {}", notification.title, description),
            NotificationLevel::Error => error!("{} {}", notification.title, description),
        }
    }
}

/// Keeps every notification in memory, in delivery order.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    received: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(Notification::is_error)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.received.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns everything received so far.
    pub fn take(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|mut received| std::mem::take(&mut *received))
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut received) = self.received.lock() {
            received.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_keeps_order() {
        let notifier = MemoryNotifier::new();
        assert!(notifier.is_empty());

        notifier.notify(Notification::success("first"));
        notifier.notify(Notification::error("second"));

        let all = notifier.notifications();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "first");
        assert_eq!(all[1].title, "second");
        assert_eq!(notifier.errors().len(), 1);
    }

    #[test]
    fn test_take_drains() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notification::success("one"));

        assert_eq!(notifier.take().len(), 1);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_log_notifier_accepts_both_levels() {
        let notifier = LogNotifier;
        notifier.notify(Notification::success("ok"));
        notifier.notify(Notification::error("bad").with_description("details"));
    }
}
