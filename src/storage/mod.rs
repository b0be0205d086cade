//! Storage layer for person records.
//!
//! # Modules
//!
//! - `backend`: Repository trait and sort keys
//! - `memory`: In-process repository implementation

pub mod backend;
pub mod memory;

pub use backend::{Repository, SortKey, SortKeyFn};
pub use memory::{MemoryRepository, RepositoryOperation};
