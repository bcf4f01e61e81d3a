use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✔",
            Self::Warning => "⚠",
            Self::Error => "✖",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

/// Single transient banner. A new call replaces the current one and restarts
/// the hide timer.
#[derive(Debug)]
pub struct Notifier {
    current: Option<(Notification, Instant)>,
    duration: Duration,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.show_at(message, kind, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        let message = message.into();
        debug!(?kind, message = message.as_str(), "notification");
        self.current = Some((Notification { message, kind }, now + self.duration));
    }

    pub fn visible(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|(_, hide_at)| now < *hide_at)
            .map(|(n, _)| n)
    }

    /// Drops an expired banner. Returns true when something was hidden.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|(_, hide_at)| now >= *hide_at) {
            self.current = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE: Duration = Duration::from_secs(3);

    #[test]
    fn banner_hides_after_duration() {
        let mut notifier = Notifier::new(THREE);
        let start = Instant::now();
        notifier.show_at("saved", NotificationKind::Success, start);

        assert!(notifier.visible(start + Duration::from_millis(2999)).is_some());
        assert!(notifier.visible(start + THREE).is_none());
        assert!(notifier.expire(start + THREE));
        assert!(!notifier.expire(start + THREE));
    }

    #[test]
    fn last_call_wins() {
        let mut notifier = Notifier::new(THREE);
        let start = Instant::now();
        notifier.show_at("first", NotificationKind::Info, start);
        notifier.show_at("second", NotificationKind::Error, start + Duration::from_secs(2));

        let later = start + Duration::from_secs(4);
        let shown = notifier.visible(later).unwrap();
        assert_eq!(shown.message, "second");
        assert_eq!(shown.kind, NotificationKind::Error);
        assert!(!notifier.expire(later));
    }
}
