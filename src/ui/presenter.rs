//! Presentation-side notification tracking.
//!
//! [`NotificationPresenter`] subscribes to the event channel, remembers when
//! the pending notification was first shown, and turns an elapsed display
//! duration into a timeout dismissal event. Clearing the channel stays the job
//! of the event handler that receives that event.

use crate::app::Event;
use crate::events::{
    DismissReason, EventChannel, EventNotification, NotificationId, NotificationTimings,
    NotificationWatcher,
};
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
struct Shown {
    id: NotificationId,
    deadline: Option<Instant>,
}

#[derive(Debug)]
pub struct NotificationPresenter {
    watcher: NotificationWatcher,
    initial: Option<EventNotification>,
    shown: Option<Shown>,
}

impl NotificationPresenter {
    /// Subscribes to `channel`; a notification already pending counts as shown
    /// from the first [`poll`](Self::poll).
    #[must_use]
    pub fn new(channel: &EventChannel) -> Self {
        let watcher = channel.subscribe();
        let initial = watcher.latest();
        Self {
            watcher,
            initial,
            shown: None,
        }
    }

    /// Observes the channel at `now` and reports a timed-out notification.
    pub fn poll(&mut self, now: Instant, timings: &NotificationTimings) -> Option<Event> {
        let update = match self.initial.take() {
            Some(initial) => Some(self.watcher.changed().unwrap_or(Some(initial))),
            None => self.watcher.changed(),
        };

        if let Some(latest) = update {
            self.shown = latest.map(|notification| Shown {
                id: notification.id,
                deadline: notification.duration.timeout(timings).map(|after| now + after),
            });
        }

        match self.shown {
            Some(Shown { id, deadline: Some(deadline) }) if now >= deadline => {
                self.shown = None;
                tracing::debug!(notification_id = %id, "notification timed out");
                Some(Event::NotificationDismissed {
                    id,
                    reason: DismissReason::Timeout,
                })
            }
            _ => None,
        }
    }

    /// When the shown notification will time out, if it does.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.shown.and_then(|shown| shown.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NotificationDuration;
    use std::time::Duration;

    fn timings() -> NotificationTimings {
        NotificationTimings {
            short: Duration::from_millis(100),
            long: Duration::from_millis(500),
        }
    }

    #[test]
    fn short_notification_times_out_once() {
        let channel = EventChannel::new();
        let mut presenter = NotificationPresenter::new(&channel);
        let start = Instant::now();

        let id = channel.emit(EventNotification::new("Saved"));
        assert_eq!(presenter.poll(start, &timings()), None);
        assert_eq!(presenter.poll(start + Duration::from_millis(50), &timings()), None);

        let event = presenter.poll(start + Duration::from_millis(100), &timings());
        assert_eq!(
            event,
            Some(Event::NotificationDismissed { id, reason: DismissReason::Timeout })
        );
        assert_eq!(presenter.poll(start + Duration::from_millis(200), &timings()), None);
    }

    #[test]
    fn replacement_restarts_the_clock() {
        let channel = EventChannel::new();
        let mut presenter = NotificationPresenter::new(&channel);
        let start = Instant::now();

        channel.emit(EventNotification::new("first"));
        presenter.poll(start, &timings());
        let second = channel.emit(EventNotification::new("second"));
        assert_eq!(presenter.poll(start + Duration::from_millis(90), &timings()), None);
        assert_eq!(presenter.poll(start + Duration::from_millis(150), &timings()), None);

        let event = presenter.poll(start + Duration::from_millis(190), &timings());
        assert_eq!(
            event,
            Some(Event::NotificationDismissed { id: second, reason: DismissReason::Timeout })
        );
    }

    #[test]
    fn indefinite_and_pre_existing_notifications() {
        let channel = EventChannel::new();
        channel.emit(EventNotification::new("sticky").with_duration(NotificationDuration::Indefinite));

        let mut presenter = NotificationPresenter::new(&channel);
        let start = Instant::now();
        assert_eq!(presenter.poll(start, &timings()), None);
        assert_eq!(presenter.next_deadline(), None);
        assert_eq!(presenter.poll(start + Duration::from_secs(3600), &timings()), None);
    }
}
