//! User notifications module

mod models;
mod notifier;

pub use models::{Notification, NotificationLevel};
pub use notifier::{LogNotifier, MemoryNotifier, Notifier};
