//! Toast notifications.

pub mod center;

pub use center::{Notification, NotificationCenter, NotificationId, Severity};
