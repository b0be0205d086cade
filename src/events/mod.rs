//! Event channel: the single pending user-facing notification.
//!
//! # Modules
//!
//! - [`notification`]: Notification payload, duration classes, actions
//! - [`channel`]: Replay-latest, last-write-wins slot shared with producers

pub mod channel;
pub mod notification;

pub use channel::{EventChannel, NotificationWatcher};
pub use notification::{
    DismissReason, EventNotification, NotificationAction, NotificationDuration, NotificationId,
    NotificationIntent, NotificationKind, NotificationTimings,
};
