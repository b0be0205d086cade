//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the owning
//! (UI) thread and the persistence worker thread. It also carries distributed
//! tracing context across the thread boundary so worker spans join the trace of
//! the intent that caused them.

use crate::domain::{Person, PersonId};
use crate::storage::{RepositoryOperation, SortKey};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled,
    /// which is always the case when tracing was never initialized.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            tracing::trace!("no valid span context to propagate");
            None
        }
    }
}

/// Why a person is being created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreateOrigin {
    /// Submitted from the person editor.
    Editor,
    /// Re-created by undoing an optimistic removal.
    Restore,
}

/// Generates builder methods that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_people(LoadPeople { sort_key: SortKey }),
    find_person(FindPerson { id: PersonId }),
    create_person(CreatePerson { person: Person, origin: CreateOrigin }),
    update_person(UpdatePerson { person: Person }),
    remove_person(RemovePerson { person: Person }),
}

/// Messages sent from the owning thread to the worker thread.
///
/// Each variant is one repository call. All variants include an optional trace
/// context for distributed tracing support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// List every person in the given order.
    LoadPeople {
        sort_key: SortKey,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Look one person up.
    FindPerson {
        id: PersonId,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Store a new person.
    CreatePerson {
        person: Person,
        origin: CreateOrigin,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Replace an existing person.
    UpdatePerson {
        person: Person,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Delete a person. Issued fire-and-forget by optimistic removal.
    RemovePerson {
        person: Person,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached when the message was built.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadPeople { trace_context, .. }
            | Self::FindPerson { trace_context, .. }
            | Self::CreatePerson { trace_context, .. }
            | Self::UpdatePerson { trace_context, .. }
            | Self::RemovePerson { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Completions sent from the worker thread back to the owning thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// People were listed, already sorted.
    PeopleLoaded { people: Vec<Person> },

    /// A lookup finished; `person` is `None` when the id is unknown.
    PersonFound { id: PersonId, person: Option<Person> },

    /// A person was stored.
    PersonCreated { person: Person, origin: CreateOrigin },

    /// A person was replaced.
    PersonUpdated { person: Person },

    /// A person was deleted.
    PersonRemoved { id: PersonId },

    /// The repository call failed.
    Error {
        /// Which repository operation failed.
        operation: RepositoryOperation,
        /// Human-readable error message.
        message: String,
    },
}
