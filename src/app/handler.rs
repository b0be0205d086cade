//! Event handling and state transition logic.
//!
//! This module implements the intent boundary of the application. User intents,
//! notification outcomes and worker completions arrive as [`Event`]s;
//! [`handle_event`] mutates [`AppState`] and returns the side effects to run.
//!
//! # Architecture
//!
//! ```text
//! intent → dispatch → handle_event → state mutations → actions → worker
//!              ↑                                                   │
//!              └──────────────── WorkerResponse ───────────────────┘
//! ```
//!
//! Repository failures come back as `Err` from [`handle_event`] and are turned
//! into notifications by [`dispatch`], which also catches panics raised while
//! handling an intent. Structural misuse (popping at the root, removing a person
//! that is not listed, editing without a loaded person) is a logged no-op.
//!
//! # Example
//!
//! ```rust
//! use contactbook::app::{dispatch, AppState, Event};
//! use contactbook::domain::Destination;
//!
//! let mut state = AppState::default();
//! let (redraw, actions) = dispatch(&mut state, &Event::SwitchTab(Destination::Settings));
//! assert!(redraw);
//! assert!(actions.is_empty());
//! assert_eq!(state.navigation.effective_stack(), vec![Destination::People, Destination::Settings]);
//! ```

use super::editor::{PersonField, PersonForm};
use super::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::error::{ContactsError, Result};
use crate::domain::{Destination, PersonId};
use crate::events::{
    DismissReason, EventNotification, NotificationId, NotificationIntent, NotificationKind,
};
use crate::navigation::PopOutcome;
use crate::storage::SortKey;
use crate::worker::{CreateOrigin, WorkerMessage, WorkerResponse};
use std::panic::{self, AssertUnwindSafe};

/// Events triggered by user intents, notification outcomes or the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Activates a top-level tab, keeping every tab's history.
    SwitchTab(Destination),
    /// Opens the detail screen and looks the person up.
    OpenPerson(PersonId),
    /// Opens an empty editor.
    NewPerson,
    /// Opens the editor for the person on the detail screen.
    EditPerson,
    /// Replaces the text of one editor field.
    EditField { field: PersonField, value: String },
    /// Validates the editor and stores the person.
    SavePerson,
    /// Pops the active stack, or returns to the default tab from a tab root.
    Back,
    /// Optimistically removes a person and offers undo.
    RemovePerson(PersonId),
    /// Restores the last removed person.
    UndoRemoval,
    /// The presentation has reacted to the restored row.
    AcknowledgeRestored,
    /// Enters search mode with the given query; an empty query leaves it.
    Search(String),
    ExitSearch,
    SetSortKey(SortKey),
    ReloadPeople,
    /// A notification left the screen without its action being performed.
    NotificationDismissed { id: NotificationId, reason: DismissReason },
    /// The notification's action button was used.
    NotificationActionPerformed { id: NotificationId },
    Quit,

    /// Wraps a completion from the persistence worker.
    WorkerResponse(WorkerResponse),
}

/// Handles `event` and converts every failure into a notification.
///
/// `Err` results become notifications according to their category; not-found
/// errors navigate back to the default tab once dismissed. A panic raised while
/// handling the event is caught and replaced by a generic notification. When
/// the effective stack changed, a navigation snapshot is recorded for debugging.
///
/// Returns whether the screen needs redrawing and the actions to execute.
pub fn dispatch(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    run_guarded(state, event, handle_event)
}

fn run_guarded<F>(state: &mut AppState, event: &Event, handler: F) -> (bool, Vec<Action>)
where
    F: FnOnce(&mut AppState, &Event) -> Result<(bool, Vec<Action>)>,
{
    let before = state.navigation.effective_stack();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler(&mut *state, event)));

    let result = match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(error)) => {
            tracing::debug!(error = %error, category = ?error.category(), "intent failed");
            let safe_root = state.navigation.default_key().clone();
            let tab = state.navigation.active_key().clone();
            state
                .events
                .emit(EventNotification::from_error(&error, safe_root).raised_on(tab));
            (true, vec![])
        }
        Err(_) => {
            tracing::error!(event = ?event, "intent handler panicked");
            state.events.emit(EventNotification::unexpected());
            (true, vec![])
        }
    };

    if state.navigation.effective_stack() != before {
        crate::observability::navigation::record(&state.navigation.snapshot());
    }
    result
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Errors
///
/// Returns the error a repository completion carried, a not-found error when
/// the opened person does not exist, or a validation error when the editor is
/// saved with invalid fields.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::SwitchTab(tab) => {
            if !tab.is_top_level() {
                tracing::debug!(destination = ?tab, "not a tab, ignoring");
                return Ok((false, vec![]));
            }
            state.navigation.switch_top_level(tab.clone());
            Ok((true, vec![]))
        }
        Event::OpenPerson(id) => {
            state.navigation.push(Destination::PersonDetail(*id));
            if state.detail.as_ref().map(|person| person.id) != Some(*id) {
                state.detail = None;
            }
            Ok((true, vec![Action::PostToWorker(WorkerMessage::find_person(*id))]))
        }
        Event::NewPerson => {
            state.editor = Some(PersonForm::blank());
            state.navigation.push(Destination::PersonEditor(None));
            Ok((true, vec![]))
        }
        Event::EditPerson => {
            let Destination::PersonDetail(id) = state.navigation.current() else {
                tracing::debug!("edit requested outside the detail screen");
                return Ok((false, vec![]));
            };
            let Some(person) = state.detail.as_ref().filter(|person| person.id == id) else {
                tracing::debug!(person_id = %id, "edit requested before person loaded");
                return Ok((false, vec![]));
            };
            state.editor = Some(PersonForm::from_person(person));
            state.navigation.push(Destination::PersonEditor(Some(id)));
            Ok((true, vec![]))
        }
        Event::EditField { field, value } => {
            match (&mut state.editor, state.navigation.current()) {
                (Some(form), Destination::PersonEditor(_)) => {
                    form.set(*field, value.clone());
                    Ok((true, vec![]))
                }
                _ => {
                    tracing::debug!(field = ?field, "field edit outside the editor");
                    Ok((false, vec![]))
                }
            }
        }
        Event::SavePerson => handle_save(state),
        Event::Back => {
            match state.navigation.pop() {
                PopOutcome::Popped(Destination::PersonEditor(_)) => state.editor = None,
                PopOutcome::Popped(_) | PopOutcome::ReturnedToDefault => {}
                PopOutcome::AtRoot => {
                    tracing::debug!("back at default root ignored");
                    return Ok((false, vec![]));
                }
            }
            Ok((true, vec![]))
        }
        Event::RemovePerson(id) => handle_remove(state, *id),
        Event::UndoRemoval => Ok(undo_removal(state)),
        Event::AcknowledgeRestored => {
            let had_marker = state.removals.just_restored().is_some();
            state.removals.acknowledge_restored();
            Ok((had_marker, vec![]))
        }
        Event::Search(query) => {
            if query.trim().is_empty() {
                return handle_event(state, &Event::ExitSearch);
            }
            state.input_mode = InputMode::Search;
            state.search_query.clone_from(query);
            tracing::trace!(query = %query, "search query updated");
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            state.input_mode = InputMode::Normal;
            state.search_query.clear();
            Ok((true, vec![]))
        }
        Event::SetSortKey(sort_key) => {
            if state.sort_key == *sort_key {
                return Ok((false, vec![]));
            }
            state.sort_key = *sort_key;
            Ok((true, vec![reload(state)]))
        }
        Event::ReloadPeople => Ok((false, vec![reload(state)])),
        Event::NotificationDismissed { id, reason } => Ok(handle_dismissed(state, *id, *reason)),
        Event::NotificationActionPerformed { id } => Ok(handle_action_performed(state, *id)),
        Event::Quit => Ok((false, vec![Action::Quit])),
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn reload(state: &AppState) -> Action {
    Action::PostToWorker(WorkerMessage::load_people(state.sort_key))
}

fn handle_save(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    if !matches!(state.navigation.current(), Destination::PersonEditor(_)) {
        tracing::debug!("save requested outside the editor");
        return Ok((false, vec![]));
    }
    let Some(mut form) = state.editor.take() else {
        tracing::debug!("save requested without a form");
        return Ok((false, vec![]));
    };

    if let Err(error) = form.validate() {
        state.editor = Some(form);
        return Err(error);
    }
    let is_new = form.is_new();
    let person = form.to_person(|| state.allocate_person_id());
    state.editor = Some(form);

    tracing::debug!(person_id = %person.id, is_new, "person submitted");
    let message = if is_new {
        WorkerMessage::create_person(person, CreateOrigin::Editor)
    } else {
        WorkerMessage::update_person(person)
    };
    Ok((true, vec![Action::PostToWorker(message)]))
}

fn handle_remove(state: &mut AppState, id: PersonId) -> Result<(bool, Vec<Action>)> {
    let Some(person) = state.removals.remove(&mut state.people, &id) else {
        return Ok((false, vec![]));
    };

    if matches!(
        state.navigation.current(),
        Destination::PersonDetail(shown) | Destination::PersonEditor(Some(shown)) if shown == id
    ) {
        let tab = state.navigation.active_key().clone();
        state.navigation.reset_to_root(&tab);
        state.editor = None;
    }

    state
        .events
        .emit(EventNotification::undo_prompt(format!("Removed {}", person.display_name())));
    Ok((true, vec![Action::PostToWorker(WorkerMessage::remove_person(person))]))
}

fn undo_removal(state: &mut AppState) -> (bool, Vec<Action>) {
    if let Some(pending) = state.events.current() {
        if pending.kind == NotificationKind::UndoPrompt {
            state.events.consume_and_clear(pending.id);
        }
    }

    match state.removals.undo(&mut state.people) {
        Some(person) => (
            true,
            vec![Action::PostToWorker(WorkerMessage::create_person(
                person,
                CreateOrigin::Restore,
            ))],
        ),
        None => (true, vec![]),
    }
}

fn handle_dismissed(state: &mut AppState, id: NotificationId, reason: DismissReason) -> (bool, Vec<Action>) {
    let Some(notification) = state.events.consume_and_clear(id) else {
        return (false, vec![]);
    };
    tracing::debug!(notification_id = %id, reason = ?reason, "notification dismissed");

    if notification.kind == NotificationKind::UndoPrompt {
        state.removals.expire();
    }

    if let Some(root) = notification.navigate_on_dismiss {
        if let Some(origin) = notification.raised_on.as_ref().filter(|tab| **tab != root) {
            state.navigation.reset_to_root(origin);
        }
        if root.is_top_level() && &root != state.navigation.active_key() {
            state.navigation.switch_top_level(root.clone());
        }
        state.navigation.pop_to_root_and_navigate(root);
        state.editor = None;
    }
    (true, vec![])
}

fn handle_action_performed(state: &mut AppState, id: NotificationId) -> (bool, Vec<Action>) {
    let Some(notification) = state.events.consume_and_clear(id) else {
        return (false, vec![]);
    };
    let Some(action) = notification.action else {
        tracing::debug!(notification_id = %id, "notification has no action");
        return (true, vec![]);
    };

    tracing::debug!(notification_id = %id, intent = ?action.intent, "notification action performed");
    match action.intent {
        NotificationIntent::UndoRemoval => undo_removal(state),
        NotificationIntent::ReloadPeople => (true, vec![reload(state)]),
    }
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::PeopleLoaded { people } => {
            state.replace_people(people);
            Ok((true, vec![]))
        }
        WorkerResponse::PersonFound { id, person } => {
            if state.navigation.current() != Destination::PersonDetail(*id) {
                tracing::debug!(person_id = %id, "stale lookup ignored");
                return Ok((false, vec![]));
            }
            match person {
                Some(person) => {
                    state.detail = Some(person.clone());
                    Ok((true, vec![]))
                }
                None => Err(ContactsError::NotFound {
                    entity: "Person",
                    id: id.to_string(),
                }),
            }
        }
        WorkerResponse::PersonCreated { person, origin } => match origin {
            CreateOrigin::Editor => {
                if state.navigation.current() == Destination::PersonEditor(None) {
                    state.navigation.pop();
                    state.editor = None;
                }
                state
                    .events
                    .emit(EventNotification::new(format!("Saved {}", person.display_name())));
                Ok((true, vec![reload(state)]))
            }
            CreateOrigin::Restore => {
                tracing::debug!(person_id = %person.id, "restored person persisted");
                Ok((false, vec![]))
            }
        },
        WorkerResponse::PersonUpdated { person } => {
            if state.navigation.current() == Destination::PersonEditor(Some(person.id)) {
                state.navigation.pop();
                state.editor = None;
            }
            if state.detail.as_ref().is_some_and(|shown| shown.id == person.id) {
                state.detail = Some(person.clone());
            }
            state
                .events
                .emit(EventNotification::new(format!("Updated {}", person.display_name())));
            Ok((true, vec![reload(state)]))
        }
        WorkerResponse::PersonRemoved { id } => {
            tracing::debug!(person_id = %id, "removal persisted");
            Ok((false, vec![]))
        }
        WorkerResponse::Error { operation, message } => {
            tracing::debug!(operation = ?operation, message = %message, "worker reported failure");
            Err(ContactsError::Storage(format!(
                "could not {}: {message}",
                operation.describe()
            )))
        }
    }
}
