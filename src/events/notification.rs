//! Transient user-facing notifications.
//!
//! An [`EventNotification`] is plain data: the message, an optional single action,
//! how long it stays visible, and an optional destination the app navigates to
//! once the user dismisses it. Behaviour attached to the action or the dismissal
//! is carried as data ([`NotificationIntent`], [`Destination`]) and executed by
//! the event handler on the owning thread, never by the notification itself.

use crate::domain::{ContactsError, Destination, ErrorCategory};
use std::fmt;
use std::time::Duration;

/// Identifier assigned by the channel at emission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display duration class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationDuration {
    Short,
    Long,
    /// Stays until dismissed or acted on.
    Indefinite,
}

impl NotificationDuration {
    /// Auto-dismiss delay under the given timings, `None` for indefinite.
    #[must_use]
    pub const fn timeout(self, timings: &NotificationTimings) -> Option<Duration> {
        match self {
            Self::Short => Some(timings.short),
            Self::Long => Some(timings.long),
            Self::Indefinite => None,
        }
    }
}

/// Concrete delays for the duration classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTimings {
    pub short: Duration,
    pub long: Duration,
}

impl Default for NotificationTimings {
    fn default() -> Self {
        Self {
            short: Duration::from_millis(4_000),
            long: Duration::from_millis(10_000),
        }
    }
}

/// What a notification is about. Decides what dismissal means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    /// Offers to revert the latest optimistic removal.
    UndoPrompt,
    Error(ErrorCategory),
}

/// Intent dispatched when the notification's action is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationIntent {
    UndoRemoval,
    ReloadPeople,
}

/// Single action button of a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    pub label: String,
    pub intent: NotificationIntent,
}

/// How a notification left the screen without its action being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Timeout,
    Swipe,
    Explicit,
}

/// A pending user-facing message.
///
/// # Example
///
/// ```rust
/// use contactbook::domain::Destination;
/// use contactbook::events::{EventNotification, NotificationDuration};
///
/// let notification = EventNotification::new("Person not found")
///     .dismissible()
///     .with_duration(NotificationDuration::Long)
///     .navigate_on_dismiss(Destination::People);
/// assert_eq!(notification.navigate_on_dismiss, Some(Destination::People));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventNotification {
    /// Zero until the channel assigns an id on emission.
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub action: Option<NotificationAction>,
    /// Whether a dismiss affordance is shown.
    pub dismissible: bool,
    pub duration: NotificationDuration,
    /// Root the active stack is reset to once the notification is dismissed.
    pub navigate_on_dismiss: Option<Destination>,
    /// Tab that was active when the notification was raised. Its history is
    /// cut back to its root before deferred navigation runs.
    pub raised_on: Option<Destination>,
}

impl EventNotification {
    /// Creates a short informational notification without action.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: NotificationId(0),
            message: message.into(),
            kind: NotificationKind::Info,
            action: None,
            dismissible: false,
            duration: NotificationDuration::Short,
            navigate_on_dismiss: None,
            raised_on: None,
        }
    }

    /// Undo prompt shown after an optimistic removal.
    #[must_use]
    pub fn undo_prompt(message: impl Into<String>) -> Self {
        Self::new(message)
            .with_kind(NotificationKind::UndoPrompt)
            .with_action("Undo", NotificationIntent::UndoRemoval)
            .with_duration(NotificationDuration::Long)
    }

    /// Converts an error into the notification its category calls for.
    ///
    /// Not-found errors navigate to `safe_root` on dismissal; persistence and
    /// validation errors keep the user on the current screen.
    #[must_use]
    pub fn from_error(error: &ContactsError, safe_root: Destination) -> Self {
        let category = error.category();
        let base = Self::new(error.to_string())
            .with_kind(NotificationKind::Error(category))
            .dismissible();

        match category {
            ErrorCategory::NotFound => base
                .with_duration(NotificationDuration::Long)
                .navigate_on_dismiss(safe_root),
            ErrorCategory::Persistence => base.with_duration(NotificationDuration::Long),
            ErrorCategory::Validation => base.with_duration(NotificationDuration::Short),
        }
    }

    /// Generic notification for faults that escaped the intent handler.
    #[must_use]
    pub fn unexpected() -> Self {
        Self::new("Something went wrong")
            .with_kind(NotificationKind::Error(ErrorCategory::Persistence))
            .dismissible()
            .with_duration(NotificationDuration::Long)
    }

    #[must_use]
    pub fn with_kind(mut self, kind: NotificationKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_action(mut self, label: impl Into<String>, intent: NotificationIntent) -> Self {
        self.action = Some(NotificationAction {
            label: label.into(),
            intent,
        });
        self
    }

    #[must_use]
    pub fn dismissible(mut self) -> Self {
        self.dismissible = true;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: NotificationDuration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn navigate_on_dismiss(mut self, destination: Destination) -> Self {
        self.navigate_on_dismiss = Some(destination);
        self
    }

    #[must_use]
    pub fn raised_on(mut self, tab: Destination) -> Self {
        self.raised_on = Some(tab);
        self
    }
}
