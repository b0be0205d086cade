//! Background persistence worker.
//!
//! Repository calls run on a dedicated thread; the owning thread posts
//! [`WorkerMessage`]s and applies [`WorkerResponse`]s through the event handler.

pub mod handler;
pub mod messages;

pub use handler::{spawn, PersistenceWorker, WorkerHandle};
pub use messages::{CreateOrigin, TraceContext, WorkerMessage, WorkerResponse};
