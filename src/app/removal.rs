//! Optimistic removal with a single undo slot.
//!
//! [`RemovalCoordinator`] removes an entity from the displayed collection
//! immediately and remembers it together with its original index. Until the
//! next removal, [`RemovalCoordinator::undo`] puts it back. Persistence is not
//! performed here: `remove` and `undo` return the entity the caller has to hand
//! to the worker, and the caller never waits for the result.

use crate::domain::{Person, PersonId};
use std::fmt::Debug;

/// Entities with a stable identity, compared by identity rather than by value.
pub trait Identified {
    type Id: Clone + PartialEq + Debug;

    fn identity(&self) -> Self::Id;
}

impl Identified for Person {
    type Id = PersonId;

    fn identity(&self) -> PersonId {
        self.id
    }
}

/// Snapshot of the last removed entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRemoval<T> {
    pub entity: T,
    /// Index the entity occupied when it was removed.
    pub index: usize,
}

/// `Idle` when `pending` is `None`, `PendingRemoval` otherwise.
#[derive(Debug, Clone)]
pub struct RemovalCoordinator<T: Identified> {
    pending: Option<PendingRemoval<T>>,
    just_restored: Option<T::Id>,
}

impl<T: Identified> Default for RemovalCoordinator<T> {
    fn default() -> Self {
        Self {
            pending: None,
            just_restored: None,
        }
    }
}

impl<T> RemovalCoordinator<T>
where
    T: Identified + Clone + Debug,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Excises the entity with identity `id` from `items`.
    ///
    /// Returns the removed entity so the caller can issue the persistence call.
    /// Returns `None` and leaves every slot untouched when `id` is not present.
    /// A previous pending removal is overwritten and can no longer be undone.
    pub fn remove(&mut self, items: &mut Vec<T>, id: &T::Id) -> Option<T> {
        let Some(index) = items.iter().position(|item| &item.identity() == id) else {
            tracing::debug!(id = ?id, "remove ignored, entity not in collection");
            return None;
        };

        let entity = items.remove(index);
        let superseded = self.pending.replace(PendingRemoval {
            entity: entity.clone(),
            index,
        });

        if let Some(previous) = superseded {
            tracing::debug!(
                abandoned = ?previous.entity.identity(),
                "pending removal superseded, no longer undoable"
            );
        }
        tracing::debug!(id = ?id, index, remaining = items.len(), "entity removed optimistically");

        Some(entity)
    }

    /// Re-inserts the pending entity.
    ///
    /// The entity goes back to `min(original index, items.len())` and is marked
    /// as just restored. Returns it so the caller can issue the re-creation
    /// call. The pending slot is cleared in every case; nothing is inserted when
    /// the collection already holds an entity with the same identity.
    pub fn undo(&mut self, items: &mut Vec<T>) -> Option<T> {
        let Some(PendingRemoval { entity, index }) = self.pending.take() else {
            tracing::debug!("undo ignored, nothing pending");
            return None;
        };

        let id = entity.identity();
        if items.iter().any(|item| item.identity() == id) {
            tracing::debug!(id = ?id, "undo ignored, entity already present");
            return None;
        }

        let position = index.min(items.len());
        items.insert(position, entity.clone());
        self.just_restored = Some(id);
        tracing::debug!(id = ?entity.identity(), position, "entity restored");

        Some(entity)
    }

    /// Clears the "just restored" marker once the presentation has reacted.
    pub fn acknowledge_restored(&mut self) {
        self.just_restored = None;
    }

    /// Drops the pending removal once its undo affordance is gone.
    pub fn expire(&mut self) -> Option<PendingRemoval<T>> {
        let expired = self.pending.take();
        if let Some(removal) = &expired {
            tracing::debug!(id = ?removal.entity.identity(), "pending removal expired");
        }
        expired
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&PendingRemoval<T>> {
        self.pending.as_ref()
    }

    #[must_use]
    pub const fn just_restored(&self) -> Option<&T::Id> {
        self.just_restored.as_ref()
    }
}
