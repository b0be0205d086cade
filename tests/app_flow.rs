//! End-to-end flows through `dispatch` and a real persistence worker thread.

use contactbook::app::PersonField;
use contactbook::domain::{Destination, ErrorCategory, Person, PersonId};
use contactbook::events::{DismissReason, NotificationKind};
use contactbook::storage::{MemoryRepository, RepositoryOperation};
use contactbook::worker::{self, WorkerHandle};
use contactbook::{dispatch, Action, AppState, Event};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn people() -> Vec<Person> {
    vec![
        Person::new(PersonId(1), "Ada", "Lovelace"),
        Person::new(PersonId(2), "Grace", "Hopper"),
        Person::new(PersonId(3), "Alan", "Turing"),
    ]
}

fn start(repository: MemoryRepository) -> (AppState, WorkerHandle) {
    let worker = worker::spawn(Box::new(repository)).expect("worker thread starts");
    let mut state = AppState::default();
    run(&mut state, &worker, Event::ReloadPeople);
    (state, worker)
}

/// Dispatches `event` and keeps feeding worker responses back until every
/// posted message has been answered.
fn run(state: &mut AppState, worker: &WorkerHandle, event: Event) {
    let (_, actions) = dispatch(state, &event);
    let mut outstanding = post_all(worker, actions);

    while outstanding > 0 {
        let response = worker
            .recv_timeout(Duration::from_secs(5))
            .expect("worker answers every message");
        outstanding -= 1;
        let (_, actions) = dispatch(state, &Event::WorkerResponse(response));
        outstanding += post_all(worker, actions);
    }
}

fn post_all(worker: &WorkerHandle, actions: Vec<Action>) -> usize {
    actions
        .into_iter()
        .filter_map(|action| match action {
            Action::PostToWorker(message) => Some(message),
            Action::Quit => None,
        })
        .map(|message| worker.post(message).expect("worker is running"))
        .count()
}

fn names(state: &AppState) -> Vec<String> {
    state.people.iter().map(|p| p.first_name.clone()).collect()
}

#[test]
fn initial_load_sorts_by_first_name() {
    let (state, _worker) = start(MemoryRepository::with_people(people()));
    assert_eq!(names(&state), vec!["Ada", "Alan", "Grace"]);
}

#[test]
fn undo_restores_position_and_persists_again() {
    let (mut state, worker) = start(MemoryRepository::with_people(people()));

    run(&mut state, &worker, Event::RemovePerson(PersonId(3)));
    assert_eq!(names(&state), vec!["Ada", "Grace"]);
    let prompt = state.events.current().expect("undo prompt is pending");
    assert_eq!(prompt.kind, NotificationKind::UndoPrompt);
    assert_eq!(prompt.message, "Removed Alan Turing");

    run(&mut state, &worker, Event::NotificationActionPerformed { id: prompt.id });
    assert_eq!(names(&state), vec!["Ada", "Alan", "Grace"]);
    assert_eq!(state.events.current(), None);
    assert_eq!(state.removals.just_restored(), Some(&PersonId(3)));

    run(&mut state, &worker, Event::ReloadPeople);
    assert_eq!(names(&state), vec!["Ada", "Alan", "Grace"]);
}

#[test]
fn dismissed_undo_prompt_makes_removal_final() {
    let (mut state, worker) = start(MemoryRepository::with_people(people()));

    run(&mut state, &worker, Event::RemovePerson(PersonId(1)));
    let prompt = state.events.current().expect("undo prompt is pending");
    run(
        &mut state,
        &worker,
        Event::NotificationDismissed { id: prompt.id, reason: DismissReason::Timeout },
    );
    assert!(state.removals.pending().is_none());

    run(&mut state, &worker, Event::UndoRemoval);
    run(&mut state, &worker, Event::ReloadPeople);
    assert_eq!(names(&state), vec!["Alan", "Grace"]);
}

#[test]
fn failed_removal_reports_persistence_error() {
    let repository = MemoryRepository::with_people(people()).failing(RepositoryOperation::Remove);
    let (mut state, worker) = start(repository);

    run(&mut state, &worker, Event::RemovePerson(PersonId(2)));

    let notification = state.events.current().expect("error notification");
    assert_eq!(
        notification.kind,
        NotificationKind::Error(ErrorCategory::Persistence)
    );
    assert!(notification.message.contains("could not remove person"));
    assert!(notification.dismissible);
}

#[test]
fn missing_person_returns_to_people_after_dismissal() {
    let (mut state, worker) = start(MemoryRepository::with_people(people()));

    run(&mut state, &worker, Event::SwitchTab(Destination::Settings));
    run(&mut state, &worker, Event::SwitchTab(Destination::People));
    run(&mut state, &worker, Event::OpenPerson(PersonId(42)));
    assert_eq!(state.navigation.current(), Destination::PersonDetail(PersonId(42)));

    let notification = state.events.current().expect("not-found notification");
    assert_eq!(notification.kind, NotificationKind::Error(ErrorCategory::NotFound));
    assert_eq!(notification.navigate_on_dismiss, Some(Destination::People));

    run(
        &mut state,
        &worker,
        Event::NotificationDismissed { id: notification.id, reason: DismissReason::Explicit },
    );
    assert_eq!(state.navigation.effective_stack(), vec![Destination::People]);
}

#[test]
fn saving_a_new_person_closes_editor_and_reloads() {
    let (mut state, worker) = start(MemoryRepository::with_people(people()));

    run(&mut state, &worker, Event::NewPerson);
    for (field, value) in [
        (PersonField::FirstName, "Barbara"),
        (PersonField::LastName, "Liskov"),
        (PersonField::Email, "barbara@example.com"),
    ] {
        run(&mut state, &worker, Event::EditField { field, value: value.to_string() });
    }
    run(&mut state, &worker, Event::SavePerson);

    assert_eq!(state.navigation.effective_stack(), vec![Destination::People]);
    assert!(state.editor.is_none());
    assert_eq!(
        state.events.current().map(|n| n.message),
        Some("Saved Barbara Liskov".to_string())
    );
    assert_eq!(names(&state), vec!["Ada", "Alan", "Barbara", "Grace"]);
    let saved = state.people.iter().find(|p| p.first_name == "Barbara").expect("listed");
    assert_eq!(saved.id, PersonId(4));
}
