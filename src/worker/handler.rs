//! Worker thread implementation for asynchronous repository operations.
//!
//! The persistence worker owns the [`Repository`] and runs on a dedicated
//! thread so repository calls never block the owning (UI) thread. Requests
//! arrive over a channel, completions are sent back and re-enter the owner's
//! event handler. Trace context is carried across the thread boundary so worker
//! spans join the trace of the intent that caused them.

use crate::domain::error::{ContactsError, Result};
use crate::domain::{Person, PersonId};
use crate::storage::{Repository, RepositoryOperation, SortKey};
use crate::worker::messages::CreateOrigin;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Worker state for handling repository operations.
///
/// Lives on the worker thread; the owning thread talks to it only through a
/// [`WorkerHandle`].
pub struct PersistenceWorker {
    repository: Box<dyn Repository>,
}

impl std::fmt::Debug for PersistenceWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceWorker").finish_non_exhaustive()
    }
}

impl PersistenceWorker {
    /// Creates a worker over the given repository.
    #[must_use]
    pub fn new(repository: Box<dyn Repository>) -> Self {
        Self { repository }
    }

    /// Helper for handling repository results with consistent logging.
    ///
    /// Failures become [`WorkerResponse::Error`] tagged with the operation;
    /// they are never propagated as panics.
    fn handle_db_result<T, F>(
        operation: RepositoryOperation,
        result: Result<T>,
        on_success: F,
    ) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = ?operation, "repository operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = ?operation, error = %e, "repository operation failed");
                WorkerResponse::Error {
                    operation,
                    message: e.to_string(),
                }
            }
        }
    }

    fn handle_load_people(&self, sort_key: SortKey) -> WorkerResponse {
        Self::handle_db_result(
            RepositoryOperation::List,
            self.repository.list_sorted_by(&|person| sort_key.key_for(person)),
            |people| {
                tracing::debug!(person_count = people.len(), sort_key = ?sort_key, "people loaded");
                WorkerResponse::PeopleLoaded { people }
            },
        )
    }

    fn handle_find_person(&self, id: PersonId) -> WorkerResponse {
        Self::handle_db_result(
            RepositoryOperation::Find,
            self.repository.find_by_id(id),
            |person| WorkerResponse::PersonFound { id, person },
        )
    }

    fn handle_create_person(&mut self, person: Person, origin: CreateOrigin) -> WorkerResponse {
        Self::handle_db_result(
            RepositoryOperation::Create,
            self.repository.create(&person),
            |()| {
                tracing::debug!(person_id = %person.id, origin = ?origin, "person stored");
                WorkerResponse::PersonCreated { person, origin }
            },
        )
    }

    /// Stamps `updated_at` before writing.
    fn handle_update_person(&mut self, mut person: Person) -> WorkerResponse {
        person.touch();

        Self::handle_db_result(
            RepositoryOperation::Update,
            self.repository.update(&person),
            |()| WorkerResponse::PersonUpdated { person },
        )
    }

    fn handle_remove_person(&mut self, person: &Person) -> WorkerResponse {
        let id = person.id;
        Self::handle_db_result(
            RepositoryOperation::Remove,
            self.repository.remove(person),
            |()| WorkerResponse::PersonRemoved { id },
        )
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Reconstructs the OpenTelemetry context from the serialized trace
    /// information so spans created here are linked to their parent span on
    /// the owning thread. The returned guard must be held for the duration of
    /// the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the matching completion.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadPeople { sort_key, .. } => self.handle_load_people(sort_key),
            WorkerMessage::FindPerson { id, .. } => self.handle_find_person(id),
            WorkerMessage::CreatePerson { person, origin, .. } => {
                self.handle_create_person(person, origin)
            }
            WorkerMessage::UpdatePerson { person, .. } => self.handle_update_person(person),
            WorkerMessage::RemovePerson { person, .. } => self.handle_remove_person(&person),
        }
    }
}

/// Starts the persistence worker on its own thread.
///
/// # Errors
///
/// Returns [`ContactsError::Io`] if the operating system refuses to spawn the
/// thread.
pub fn spawn(repository: Box<dyn Repository>) -> Result<WorkerHandle> {
    let (request_tx, request_rx) = mpsc::channel::<WorkerMessage>();
    let (response_tx, response_rx) = mpsc::channel::<WorkerResponse>();

    let thread = thread::Builder::new()
        .name("contactbook-worker".to_string())
        .spawn(move || {
            let mut worker = PersistenceWorker::new(repository);
            tracing::debug!("persistence worker started");

            for message in request_rx {
                let response = worker.handle_message(message);
                if response_tx.send(response).is_err() {
                    tracing::debug!("owner hung up, dropping completion");
                    break;
                }
            }

            tracing::debug!("persistence worker stopped");
        })?;

    Ok(WorkerHandle {
        requests: Some(request_tx),
        responses: response_rx,
        thread: Some(thread),
    })
}

/// Owner-side handle to the persistence worker.
///
/// Dropping the handle closes the request channel and joins the thread once
/// queued requests have been processed.
#[derive(Debug)]
pub struct WorkerHandle {
    requests: Option<Sender<WorkerMessage>>,
    responses: Receiver<WorkerResponse>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Queues a message for the worker. Never blocks.
    ///
    /// # Errors
    ///
    /// Returns [`ContactsError::Worker`] if the worker thread has exited.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        let sender = self
            .requests
            .as_ref()
            .ok_or_else(|| ContactsError::Worker("worker is shutting down".to_string()))?;

        sender
            .send(message)
            .map_err(|e| ContactsError::Worker(format!("worker channel closed: {e}")))
    }

    /// Next completion if one is ready.
    #[must_use]
    pub fn try_recv(&self) -> Option<WorkerResponse> {
        self.responses.try_recv().ok()
    }

    /// Waits up to `timeout` for the next completion.
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WorkerResponse> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => Some(response),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                tracing::debug!("worker disconnected while waiting for completion");
                None
            }
        }
    }

    /// Every completion that is ready right now, in arrival order.
    #[must_use]
    pub fn drain(&self) -> Vec<WorkerResponse> {
        self.responses.try_iter().collect()
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        drop(self.requests.take());
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("persistence worker panicked");
            }
        }
    }
}
