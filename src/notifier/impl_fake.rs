use crate::notifier::interface::{Notification, Notifier};
use std::sync::{Mutex, PoisonError};

/// Records every notification so tests can assert on order and content.
#[allow(dead_code)]
#[derive(Default)]
pub struct NotifierFake {
    sent: Mutex<Vec<Notification>>,
}

#[allow(dead_code)]
impl NotifierFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent().into_iter().map(|n| n.message).collect()
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.sent().into_iter().filter(|n| n.is_error()).collect()
    }
}

impl Notifier for NotifierFake {
    fn notify(&self, notification: Notification) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
        Ok(())
    }
}
