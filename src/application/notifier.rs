use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity { Success, Error }

/// A user-facing message, fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self { Self { message: message.into(), severity: Severity::Success } }

    pub fn error(message: impl Into<String>) -> Self { Self { message: message.into(), severity: Severity::Error } }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Emits notifications as log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.severity {
            Severity::Success => tracing::info!(text = %notification.message, "notify"),
            Severity::Error => tracing::warn!(text = %notification.message, "notify"),
        }
    }
}

/// Keeps notifications until someone drains them.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotifier {
    items: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self { Self::default() }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.items.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn last(&self) -> Option<Notification> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: &Notification) {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).push(notification.clone());
    }
}
