//! User-facing notification stream, rendered by the UI as transient banners.

use tokio::sync::broadcast;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct NotificationService {
    tx: broadcast::Sender<Notification>,
}

impl NotificationService {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        info!(notification = %message, "notify");
        self.publish(NotificationLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        warn!(notification = %message, "notify");
        self.publish(NotificationLevel::Error, message);
    }

    fn publish(&self, level: NotificationLevel, message: String) {
        // nobody listening is fine; banners for unmounted views are dropped
        let _ = self.tx.send(Notification { level, message });
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}
