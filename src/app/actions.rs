//! Side effects produced by the event handler.
//!
//! The handler never talks to the worker or the process directly; it returns
//! [`Action`]s and the runtime (the binary or a test harness) executes them.
//!
//! # Example
//!
//! ```rust
//! use contactbook::app::Action;
//! use contactbook::storage::SortKey;
//! use contactbook::worker::WorkerMessage;
//!
//! let actions = vec![Action::PostToWorker(WorkerMessage::load_people(SortKey::FirstName))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;

/// Commands executed by the runtime after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Posts a message to the persistence worker without waiting for it.
    ///
    /// The completion comes back later as `Event::WorkerResponse`.
    PostToWorker(WorkerMessage),

    /// Stops the runtime loop.
    Quit,
}
