/// Blocking alerts shown to the user
///
/// Screens report every validation failure, every failed request and every
/// successful mutation through an [`AlertPresenter`]. How an alert is shown
/// (modal dialog, console line) is up to the front-end.

use std::fmt;
use std::sync::{Arc, Mutex};

/// A titled message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Alert title
    pub title: String,

    /// Optional body text
    pub message: Option<String>,
}

impl Alert {
    /// Creates a title-only alert
    pub fn new(title: impl Into<String>) -> Self {
        Alert {
            title: title.into(),
            message: None,
        }
    }

    /// Creates an alert with a body
    pub fn with_message(title: impl Into<String>, message: impl Into<String>) -> Self {
        Alert {
            title: title.into(),
            message: Some(message.into()),
        }
    }

    /// `Success` alert
    pub fn success(message: impl Into<String>) -> Self {
        Alert::with_message("Success", message)
    }

    /// `Error` alert
    pub fn error(message: impl Into<String>) -> Self {
        Alert::with_message("Error", message)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "[{}] {}", self.title, message),
            None => write!(f, "[{}]", self.title),
        }
    }
}

/// Shows alerts to the user
pub trait AlertPresenter: Send + Sync {
    /// Presents `alert`
    fn present(&self, alert: Alert);
}

/// Presenter that queues alerts for the caller to render
///
/// The console front-end drains it after every command; tests use it to
/// assert on what the user would have seen.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    alerts: Arc<Mutex<Vec<Alert>>>,
}

impl RecordingPresenter {
    /// Creates an empty presenter
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every alert presented so far
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Removes and returns queued alerts
    pub fn drain(&self) -> Vec<Alert> {
        std::mem::take(
            &mut *self
                .alerts
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    /// Returns the most recent alert
    pub fn last(&self) -> Option<Alert> {
        self.alerts().pop()
    }
}

impl AlertPresenter for RecordingPresenter {
    fn present(&self, alert: Alert) {
        tracing::debug!(title = %alert.title, "alert presented");
        self.alerts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(alert);
    }
}
