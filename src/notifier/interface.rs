use crate::config::NotificationConfig;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Normal,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    TopLeft,
    #[default]
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopCenter => "top-center",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomCenter => "bottom-center",
            Position::BottomRight => "bottom-right",
        }
    }

    pub fn from_name(name: &str) -> Option<Position> {
        let name = name.trim();
        Position::ALL
            .into_iter()
            .find(|position| position.name().eq_ignore_ascii_case(name))
    }
}

/// A short-lived status message for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
    pub position: Position,
}

impl Notification {
    pub fn info(message: impl Into<String>, config: &NotificationConfig) -> Self {
        Self::new(message, Severity::Normal, config)
    }

    pub fn error(message: impl Into<String>, config: &NotificationConfig) -> Self {
        Self::new(message, Severity::Error, config)
    }

    fn new(message: impl Into<String>, severity: Severity, config: &NotificationConfig) -> Self {
        Self {
            message: message.into(),
            severity,
            duration: config.duration,
            position: config.position,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_name() {
        assert_eq!(Position::from_name("bottom-right"), Some(Position::BottomRight));
        assert_eq!(Position::from_name(" Top-Left "), Some(Position::TopLeft));
        assert_eq!(Position::from_name("middle"), None);
    }

    #[test]
    fn test_notification_uses_configured_position() {
        let config = NotificationConfig {
            position: Position::BottomCenter,
            ..NotificationConfig::default()
        };
        let notification = Notification::error("boom", &config);

        assert!(notification.is_error());
        assert_eq!(notification.position, Position::BottomCenter);
        assert_eq!(notification.duration, config.duration);
    }
}
