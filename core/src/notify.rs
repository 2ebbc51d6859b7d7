//! User-facing notifications emitted after mutations.

use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: None,
        }
    }

    pub fn error(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description,
        }
    }
}

/// Sink for notifications (toasts in a UI, log lines in a CLI).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification);
}

/// Writes notifications to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, notification: Notification) {
        let description = notification.description.as_deref().unwrap_or("");
        match notification.kind {
            NotificationKind::Success | NotificationKind::Info => {
                info!(kind = %notification.kind, %description, "{}", notification.title)
            }
            NotificationKind::Warning => warn!(%description, "{}", notification.title),
            NotificationKind::Error => error!(%description, "{}", notification.title),
        }
    }
}

/// Keeps every notification in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.received.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.received.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::success("Kaydedildi")).await;
        notifier
            .notify(Notification::error("Kaydedilemedi", Some("name: zorunlu".to_string())))
            .await;

        let received = notifier.take();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].kind, NotificationKind::Success);
        assert_eq!(received[1].description.as_deref(), Some("name: zorunlu"));
        assert!(notifier.notifications().is_empty());
    }

    #[test]
    fn kind_serializes_lowercase() {
        let value = serde_json::to_value(Notification::success("ok")).unwrap();
        assert_eq!(value["kind"], "success");
        assert_eq!(NotificationKind::Warning.to_string(), "warning");
    }
}
