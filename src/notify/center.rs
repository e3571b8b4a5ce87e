//! Single-slot toast notifications.
//!
//! [`NotificationCenter::show`] dismisses whatever is outstanding before
//! registering the new notification, so at most one is ever visible. Expiry
//! is driven from outside: the plugin shim schedules a host timer for each
//! notification and calls [`NotificationCenter::expire`] when it fires.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::infrastructure::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Auto-dismiss delay used by the convenience constructors.
    #[must_use]
    pub fn default_duration(self) -> Duration {
        Duration::milliseconds(match self {
            Self::Success | Self::Info => 4000,
            Self::Error => 6000,
            Self::Warning => 5000,
        })
    }

    #[must_use]
    pub const fn default_icon(self) -> &'static str {
        match self {
            Self::Success => "✔",
            Self::Error => "✖",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub icon: String,
    pub duration: Duration,
    pub shown_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    /// Fraction of the display time already elapsed, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        let total = self.duration.num_milliseconds();
        if total <= 0 {
            return 1.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = (now - self.shown_at).num_milliseconds() as f64 / total as f64;
        ratio.clamp(0.0, 1.0)
    }
}

pub struct NotificationCenter {
    outstanding: BTreeMap<NotificationId, Notification>,
    next_id: u64,
    clock: Rc<dyn Clock>,
}

impl NotificationCenter {
    #[must_use]
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            outstanding: BTreeMap::new(),
            next_id: 1,
            clock,
        }
    }

    /// Replaces any outstanding notification with a new one.
    ///
    /// `icon` falls back to the severity's default icon.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
        icon: Option<&str>,
    ) -> NotificationId {
        let dismissed = self.outstanding.len();
        self.outstanding.clear();

        let id = NotificationId(self.next_id);
        self.next_id += 1;
        let now = self.clock.now();
        let notification = Notification {
            id,
            message: message.into(),
            severity,
            icon: icon.unwrap_or_else(|| severity.default_icon()).to_string(),
            duration,
            shown_at: now,
            expires_at: now + duration,
        };

        tracing::debug!(
            id = %id,
            ?severity,
            duration_ms = duration.num_milliseconds(),
            dismissed,
            message = %notification.message,
            "notification shown"
        );
        self.outstanding.insert(id, notification);
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(message, Severity::Success, Severity::Success.default_duration(), None)
    }

    pub fn error(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(message, Severity::Error, Severity::Error.default_duration(), None)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(message, Severity::Warning, Severity::Warning.default_duration(), None)
    }

    pub fn info(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(message, Severity::Info, Severity::Info.default_duration(), None)
    }

    /// `"<Entity> created successfully"`.
    pub fn entity_created(&mut self, entity: &str) -> NotificationId {
        self.success(format!("{} created successfully", capitalize(entity)))
    }

    pub fn entity_updated(&mut self, entity: &str) -> NotificationId {
        self.success(format!("{} updated successfully", capitalize(entity)))
    }

    pub fn entity_deleted(&mut self, entity: &str) -> NotificationId {
        self.success(format!("{} deleted successfully", capitalize(entity)))
    }

    /// `"Failed to <verb> <entity>: <reason>"`.
    pub fn operation_failed(&mut self, verb: &str, entity: &str, reason: &str) -> NotificationId {
        self.error(format!("Failed to {verb} {entity}: {reason}"))
    }

    /// Removes a notification. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let removed = self.outstanding.remove(&id).is_some();
        if removed {
            tracing::debug!(id = %id, "notification dismissed");
        }
        removed
    }

    /// Removes the visible notification, if any.
    pub fn dismiss_active(&mut self) -> bool {
        let dismissed = !self.outstanding.is_empty();
        self.outstanding.clear();
        dismissed
    }

    /// Drops every notification whose deadline is at or before `now`.
    /// Returns how many were removed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.outstanding.len();
        self.outstanding.retain(|_, n| n.expires_at > now);
        let expired = before - self.outstanding.len();
        if expired > 0 {
            tracing::trace!(expired, "notifications expired");
        }
        expired
    }

    /// The visible notification.
    #[must_use]
    pub fn active(&self) -> Option<&Notification> {
        self.outstanding.values().next_back()
    }

    #[must_use]
    pub fn outstanding_count(&self) -> usize {
        self.outstanding.len()
    }
}

impl fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("outstanding", &self.outstanding)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ManualClock;

    fn center() -> (NotificationCenter, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::default());
        (NotificationCenter::new(clock.clone()), clock)
    }

    #[test]
    fn newer_show_replaces_older() {
        let (mut center, _) = center();
        let first = center.info("first");
        let second = center.error("second");

        assert_eq!(center.outstanding_count(), 1);
        assert!(!center.dismiss(first));
        let active = center.active().unwrap();
        assert_eq!(active.id, second);
        assert_eq!(active.icon, "✖");
    }

    #[test]
    fn expires_after_duration() {
        let (mut center, clock) = center();
        center.success("saved");

        clock.advance(Duration::milliseconds(3999));
        assert_eq!(center.expire(clock.now()), 0);
        clock.advance(Duration::milliseconds(1));
        assert_eq!(center.expire(clock.now()), 1);
        assert!(center.active().is_none());
    }

    #[test]
    fn custom_icon_and_duration() {
        let (mut center, clock) = center();
        center.show("custom", Severity::Warning, Duration::seconds(1), Some("★"));

        let active = center.active().unwrap();
        assert_eq!(active.icon, "★");
        clock.advance(Duration::milliseconds(500));
        assert!((active.progress(clock.now()) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn canned_entity_messages() {
        let (mut center, _) = center();
        center.entity_created("employee");
        assert_eq!(center.active().unwrap().message, "Employee created successfully");

        center.operation_failed("delete", "employee", "Not found");
        let active = center.active().unwrap();
        assert_eq!(active.message, "Failed to delete employee: Not found");
        assert_eq!(active.severity, Severity::Error);
        assert_eq!(active.duration, Duration::milliseconds(6000));
    }

    #[test]
    fn dismiss_active_clears_slot() {
        let (mut center, _) = center();
        assert!(!center.dismiss_active());
        center.warning("careful");
        assert!(center.dismiss_active());
        assert_eq!(center.outstanding_count(), 0);
    }
}
