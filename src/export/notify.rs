use std::sync::Mutex;

/// Visual weight of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Operation completed.
    Success,
    /// Operation failed.
    Destructive,
    /// Non-fatal problem the user should know about.
    Warning,
}

/// A short transient message for the user.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Notification {
    /// Visual weight.
    pub kind: NotificationKind,
    /// One or two word heading.
    pub title: String,
    /// Sentence shown under the title.
    pub description: String,
}

impl Notification {
    /// Shown after a poster file was saved.
    pub fn export_succeeded() -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Success!".to_string(),
            description: "Happy New Year! Your poster is ready.".to_string(),
        }
    }

    /// Shown when capture, encoding or saving failed.
    pub fn export_failed() -> Self {
        Self {
            kind: NotificationKind::Destructive,
            title: "Error".to_string(),
            description: "Failed to generate poster.".to_string(),
        }
    }

    /// Shown when a selected photo could not be used.
    pub fn photo_rejected(reason: impl std::fmt::Display) -> Self {
        Self {
            kind: NotificationKind::Warning,
            title: "Photo not loaded".to_string(),
            description: format!("The selected file could not be read as an image ({reason})."),
        }
    }
}

/// Receiver of user-visible notifications.
pub trait Notifier: Send + Sync {
    /// Present `n` to the user.
    fn notify(&self, n: Notification);
}

/// Emits notifications as `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.kind {
            NotificationKind::Success => {
                tracing::info!(title = %n.title, "{}", n.description)
            }
            NotificationKind::Warning => {
                tracing::warn!(title = %n.title, "{}", n.description)
            }
            NotificationKind::Destructive => {
                tracing::error!(title = %n.title, "{}", n.description)
            }
        }
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, n: Notification) {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(n);
    }
}
