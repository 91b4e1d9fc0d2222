use crate::library::logger::interface::Logger;
use crate::notifier::interface::{Notification, Notifier};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.notification.duration
    }
}

/// Toasts waiting to be painted by the window. Shared between the controller
/// thread, which pushes, and the GUI thread, which reads.
#[derive(Clone)]
pub struct NotifierToast {
    toasts: Arc<Mutex<Vec<Toast>>>,
    max_visible: usize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl NotifierToast {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, max_visible: usize) -> Self {
        Self {
            toasts: Arc::new(Mutex::new(Vec::new())),
            max_visible: max_visible.max(1),
            logger: logger.with_namespace("notifier").with_namespace("toast"),
        }
    }

    pub fn push_at(&self, notification: Notification, now: Instant) {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        toasts.retain(|t| !t.is_expired(now));
        toasts.push(Toast {
            notification,
            shown_at: now,
        });
        let overflow = toasts.len().saturating_sub(self.max_visible);
        toasts.drain(..overflow);
    }

    /// Drops expired toasts and returns the rest, oldest first.
    pub fn visible(&self, now: Instant) -> Vec<Toast> {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        toasts.retain(|t| !t.is_expired(now));
        toasts.clone()
    }
}

impl Notifier for NotifierToast {
    fn notify(&self, notification: Notification) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if notification.is_error() {
            self.logger.error(&notification.message)?;
        } else {
            self.logger.info(&notification.message)?;
        }
        self.push_at(notification, Instant::now());
        Ok(())
    }
}
