//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the runtime (the binary or a test harness) and the
//! navigation, event, storage and worker layers.
//!
//! ```text
//! Intent → Event → dispatch → State Mutations → Actions → Worker
//!                     ↑                                      ↓
//!                     └──────────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the event handler
//! - [`editor`]: Person editor form
//! - [`handler`]: Intent boundary and fault guard
//! - [`modes`]: Input mode of the people list
//! - [`removal`]: Optimistic removal with undo
//! - [`state`]: Central state container and view model computation
//! - [`validation`]: Field validators

pub mod actions;
pub mod editor;
pub mod handler;
pub mod modes;
pub mod removal;
pub mod state;
pub mod validation;

pub use actions::Action;
pub use editor::{PersonField, PersonForm};
pub use handler::{dispatch, handle_event, Event};
pub use modes::InputMode;
pub use removal::{Identified, PendingRemoval, RemovalCoordinator};
pub use state::AppState;
