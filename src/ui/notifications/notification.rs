// SPDX-License-Identifier: MPL-2.0
//! Notification record and severity.

use crate::ui::design_tokens::palette;
use iced::Color;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Severity level; determines accent color and auto-dismiss delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Info,
    Warning,
    /// Stays until dismissed.
    Error,
}

impl Severity {
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// `None` means manual dismissal.
    #[must_use]
    pub fn auto_dismiss_duration(self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }

    /// Glyph shown at the start of the toast.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Info => "ℹ",
            Severity::Warning | Severity::Error => "⚠",
        }
    }
}

/// A toast message, resolved through i18n at render time.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
    created_at: Instant,
    custom_dismiss_duration: Option<Duration>,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::next(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            created_at: Instant::now(),
            custom_dismiss_duration: None,
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Adds a Fluent argument.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    /// Sets a custom auto-dismiss delay, overriding the severity default.
    ///
    /// Lets an error toast go away on its own when the failure needs no
    /// acknowledgement.
    #[must_use]
    pub fn auto_dismiss(mut self, duration: Duration) -> Self {
        self.custom_dismiss_duration = Some(duration);
        self
    }

    /// Delay after which the notification dismisses itself, if any.
    #[must_use]
    pub fn dismiss_after(&self) -> Option<Duration> {
        self.custom_dismiss_duration
            .or_else(|| self.severity.auto_dismiss_duration())
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    /// Whether the notification has outlived its dismiss delay at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.dismiss_after()
            .is_some_and(|delay| now.saturating_duration_since(self.created_at) >= delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(Notification::success("a").id(), Notification::success("a").id());
    }

    #[test]
    fn severity_delays() {
        assert_eq!(
            Severity::Success.auto_dismiss_duration(),
            Some(Duration::from_secs(3))
        );
        assert_eq!(
            Severity::Info.auto_dismiss_duration(),
            Severity::Success.auto_dismiss_duration()
        );
        assert_eq!(
            Severity::Warning.auto_dismiss_duration(),
            Some(Duration::from_secs(5))
        );
        assert!(Severity::Error.auto_dismiss_duration().is_none());
    }

    #[test]
    fn expiry_follows_severity() {
        let info = Notification::info("x");
        let error = Notification::error("x");
        let later = Instant::now() + Duration::from_secs(3);
        assert!(info.is_expired(later));
        assert!(!error.is_expired(later + Duration::from_secs(3600)));
    }

    #[test]
    fn custom_delay_makes_errors_transient() {
        let error = Notification::error("error-download").auto_dismiss(Duration::from_secs(5));
        assert_eq!(error.severity(), Severity::Error);
        assert_eq!(error.dismiss_after(), Some(Duration::from_secs(5)));
        assert!(!error.is_expired(Instant::now()));
        assert!(error.is_expired(Instant::now() + Duration::from_secs(6)));
    }

    #[test]
    fn builder_collects_arguments() {
        let notification = Notification::error("notification-download-error")
            .with_arg("name", "trip-1.jpg")
            .with_arg("reason", "timeout");
        assert_eq!(notification.severity(), Severity::Error);
        assert_eq!(notification.message_key(), "notification-download-error");
        assert_eq!(notification.message_args().len(), 2);
    }
}
