//! Line-command shell around the contactbook library.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │      Main Thread        │
//! │  ┌──────────────────┐   │
//! │  │  Shell (state)   │   │  ← intents, rendering, notification timing
//! │  └──────────────────┘   │
//! │     │ mpsc    ▲ mpsc    │
//! │     ▼         │         │
//! │  ┌──────────────────┐   │
//! │  │ PersistenceWorker│   │  ← repository calls
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//!          ▲
//!          │ lines
//!   stdin reader thread
//! ```
//!
//! # Commands
//!
//! - `tab people|settings|about`, `back`, `quit`
//! - `open <id>`, `new`, `edit`, `set <field> <value>`, `save`
//! - `rm [<id>]`, `undo`, `ack`, `reload`
//! - `dismiss`, `action`: outcome of the pending notification
//! - `search [<query>]`, `sort first|last`
//!
//! Usage: `contactbook [config.toml]`

use contactbook::app::PersonField;
use contactbook::domain::{Destination, Person, PersonId};
use contactbook::events::DismissReason;
use contactbook::observability::init_tracing;
use contactbook::storage::{MemoryRepository, SortKey};
use contactbook::ui::{render, NotificationPresenter};
use contactbook::worker::{self, WorkerHandle};
use contactbook::{dispatch, initialize, Action, AppState, Config, Event};
use std::io::BufRead;
use std::path::Path;
use std::process::ExitCode;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_millis(100);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("no notification is showing")]
    NoNotification,
}

struct Shell {
    state: AppState,
    worker: WorkerHandle,
    presenter: NotificationPresenter,
}

impl Shell {
    /// Dispatches `event` and runs its actions.
    ///
    /// Returns whether to redraw and whether to keep running.
    fn update(&mut self, event: &Event) -> (bool, bool) {
        let (redraw, actions) = dispatch(&mut self.state, event);
        let mut running = true;

        for action in actions {
            match action {
                Action::PostToWorker(message) => {
                    if let Err(e) = self.worker.post(message) {
                        tracing::error!(error = %e, "failed to post to worker");
                    }
                }
                Action::Quit => running = false,
            }
        }
        (redraw, running)
    }

    /// Applies worker completions and timed-out notifications.
    fn tick(&mut self) -> bool {
        let mut redraw = false;
        for response in self.worker.drain() {
            redraw |= self.update(&Event::WorkerResponse(response)).0;
        }
        if let Some(event) = self.presenter.poll(Instant::now(), &self.state.timings) {
            redraw |= self.update(&event).0;
        }
        redraw
    }

    fn draw(&self) {
        println!("{}\n", render(&self.state));
    }
}

fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => match Config::from_file(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("contactbook: {e}");
                return ExitCode::from(2);
            }
        },
        None => Config::default(),
    };

    if let Err(e) = init_tracing(&config) {
        eprintln!("contactbook: tracing disabled: {e}");
    }

    let worker = match worker::spawn(Box::new(MemoryRepository::with_people(seed_people()))) {
        Ok(worker) => worker,
        Err(e) => {
            eprintln!("contactbook: {e}");
            return ExitCode::FAILURE;
        }
    };

    let state = initialize(&config);
    let presenter = NotificationPresenter::new(&state.events);
    let mut shell = Shell { state, worker, presenter };
    let lines = spawn_stdin_reader();

    shell.update(&Event::ReloadPeople);
    thread::sleep(TICK);
    shell.tick();
    shell.draw();

    loop {
        let mut redraw = false;
        let wait = input_wait(shell.presenter.next_deadline(), Instant::now());
        match lines.recv_timeout(wait) {
            Ok(line) => match parse_command(&line, &shell.state) {
                Ok(Some(event)) => {
                    let (changed, running) = shell.update(&event);
                    if !running {
                        break;
                    }
                    redraw |= changed;
                }
                Ok(None) => {}
                Err(e) => println!("? {e}"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        redraw |= shell.tick();
        if redraw {
            shell.draw();
        }
    }

    tracing::debug!("contactbook exiting");
    ExitCode::SUCCESS
}

/// How long to block on input: one tick, or less if a notification is due
/// to time out sooner.
fn input_wait(deadline: Option<Instant>, now: Instant) -> Duration {
    deadline.map_or(TICK, |deadline| deadline.saturating_duration_since(now).min(TICK))
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines().map_while(std::result::Result::ok) {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Maps one input line to an event. Blank lines map to `None`.
fn parse_command(line: &str, state: &AppState) -> Result<Option<Event>, CommandError> {
    let line = line.trim();
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let event = match command {
        "" => return Ok(None),
        "tab" => Event::SwitchTab(
            Destination::top_level_from_name(rest).ok_or(CommandError::Usage("tab people|settings|about"))?,
        ),
        "open" => Event::OpenPerson(parse_id(rest).ok_or(CommandError::Usage("open <id>"))?),
        "new" => Event::NewPerson,
        "edit" => Event::EditPerson,
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = PersonField::from_name(field)
                .ok_or(CommandError::Usage("set first|last|email|phone <value>"))?;
            Event::EditField { field, value: value.trim().to_string() }
        }
        "save" => Event::SavePerson,
        "back" => Event::Back,
        "rm" => {
            let id = if rest.is_empty() {
                match state.navigation.current() {
                    Destination::PersonDetail(id) => Some(id),
                    _ => None,
                }
            } else {
                parse_id(rest)
            };
            Event::RemovePerson(id.ok_or(CommandError::Usage("rm <id>"))?)
        }
        "undo" => Event::UndoRemoval,
        "ack" => Event::AcknowledgeRestored,
        "reload" => Event::ReloadPeople,
        "dismiss" => Event::NotificationDismissed {
            id: pending_notification(state)?,
            reason: DismissReason::Explicit,
        },
        "action" => Event::NotificationActionPerformed { id: pending_notification(state)? },
        "search" => Event::Search(rest.to_string()),
        "sort" => Event::SetSortKey(SortKey::from_name(rest).ok_or(CommandError::Usage("sort first|last"))?),
        "quit" | "q" => Event::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(event))
}

fn parse_id(text: &str) -> Option<PersonId> {
    text.trim_start_matches('#').parse().ok()
}

fn pending_notification(state: &AppState) -> Result<contactbook::events::NotificationId, CommandError> {
    state
        .events
        .current()
        .map(|notification| notification.id)
        .ok_or(CommandError::NoNotification)
}

fn seed_people() -> Vec<Person> {
    vec![
        Person::new(PersonId(1), "Ada", "Lovelace").with_email("ada@example.com"),
        Person::new(PersonId(2), "Grace", "Hopper").with_phone("+1 555 0100"),
        Person::new(PersonId(3), "Alan", "Turing").with_email("alan@example.org"),
        Person::new(PersonId(4), "Edsger", "Dijkstra"),
    ]
}
