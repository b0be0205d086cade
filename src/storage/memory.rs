//! In-process repository backend.
//!
//! Keeps every person in a map keyed by id. Nothing is written to disk; the
//! binary seeds it with sample contacts and tests use it as the default backend.
//! Individual operations can be configured to fail so error paths can be
//! exercised end to end.

use crate::domain::error::{ContactsError, Result};
use crate::domain::{Person, PersonId};
use crate::storage::backend::{Repository, SortKeyFn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Repository operations, used to configure injected failures and to label
/// worker errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepositoryOperation {
    Create,
    Update,
    Remove,
    Find,
    List,
}

impl RepositoryOperation {
    /// Phrase used in user-facing failure messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Create => "save person",
            Self::Update => "update person",
            Self::Remove => "remove person",
            Self::Find => "load person",
            Self::List => "load people",
        }
    }
}

/// Map-backed [`Repository`].
///
/// # Examples
///
/// ```
/// use contactbook::domain::{Person, PersonId};
/// use contactbook::storage::{MemoryRepository, Repository, SortKey};
///
/// let mut repo = MemoryRepository::default();
/// repo.create(&Person::new(PersonId(1), "Ada", "Lovelace"))?;
/// let people = repo.list_sorted_by(&|p| SortKey::LastName.key_for(p))?;
/// assert_eq!(people.len(), 1);
/// # Ok::<(), contactbook::ContactsError>(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryRepository {
    people: HashMap<PersonId, Person>,
    failing: HashSet<RepositoryOperation>,
}

impl MemoryRepository {
    /// Creates a repository pre-populated with `people`.
    #[must_use]
    pub fn with_people(people: impl IntoIterator<Item = Person>) -> Self {
        Self {
            people: people.into_iter().map(|p| (p.id, p)).collect(),
            failing: HashSet::new(),
        }
    }

    /// Makes every later call of `operation` fail with a storage error.
    #[must_use]
    pub fn failing(mut self, operation: RepositoryOperation) -> Self {
        self.failing.insert(operation);
        self
    }

    /// Number of stored people.
    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    fn check(&self, operation: RepositoryOperation) -> Result<()> {
        if self.failing.contains(&operation) {
            tracing::debug!(operation = ?operation, "injected repository failure");
            return Err(ContactsError::Storage(format!(
                "{operation:?} rejected by backend"
            )));
        }
        Ok(())
    }
}

impl Repository for MemoryRepository {
    fn create(&mut self, person: &Person) -> Result<()> {
        let _span = tracing::debug_span!("memory_create", person_id = %person.id).entered();
        self.check(RepositoryOperation::Create)?;

        if self.people.contains_key(&person.id) {
            return Err(ContactsError::Storage(format!(
                "person {} already exists",
                person.id
            )));
        }
        self.people.insert(person.id, person.clone());
        tracing::debug!(count = self.people.len(), "person created");
        Ok(())
    }

    fn update(&mut self, person: &Person) -> Result<()> {
        let _span = tracing::debug_span!("memory_update", person_id = %person.id).entered();
        self.check(RepositoryOperation::Update)?;

        let existing = self.people.get_mut(&person.id).ok_or_else(|| ContactsError::NotFound {
            entity: "person",
            id: person.id.to_string(),
        })?;
        existing.clone_from(person);
        tracing::debug!("person updated");
        Ok(())
    }

    fn remove(&mut self, person: &Person) -> Result<()> {
        let _span = tracing::debug_span!("memory_remove", person_id = %person.id).entered();
        self.check(RepositoryOperation::Remove)?;

        self.people
            .remove(&person.id)
            .map(|_| tracing::debug!(count = self.people.len(), "person removed"))
            .ok_or_else(|| ContactsError::NotFound {
                entity: "person",
                id: person.id.to_string(),
            })
    }

    fn find_by_id(&self, id: PersonId) -> Result<Option<Person>> {
        self.check(RepositoryOperation::Find)?;
        let person = self.people.get(&id).cloned();
        tracing::debug!(person_id = %id, found = person.is_some(), "person lookup complete");
        Ok(person)
    }

    fn list_sorted_by(&self, key: SortKeyFn<'_>) -> Result<Vec<Person>> {
        self.check(RepositoryOperation::List)?;
        let mut people: Vec<Person> = self.people.values().cloned().collect();
        people.sort_by_cached_key(|person| (key(person), person.id));
        tracing::debug!(count = people.len(), "people listed");
        Ok(people)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SortKey;
    use pretty_assertions::assert_eq;

    fn sample() -> MemoryRepository {
        MemoryRepository::with_people([
            Person::new(PersonId(1), "Grace", "Hopper"),
            Person::new(PersonId(2), "Ada", "Lovelace"),
            Person::new(PersonId(3), "Alan", "Turing"),
        ])
    }

    #[test]
    fn lists_by_requested_key() {
        let repo = sample();
        let by_first: Vec<PersonId> = repo
            .list_sorted_by(&|p| SortKey::FirstName.key_for(p))
            .expect("list succeeds")
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(by_first, vec![PersonId(2), PersonId(3), PersonId(1)]);

        let by_last: Vec<PersonId> = repo
            .list_sorted_by(&|p| SortKey::LastName.key_for(p))
            .expect("list succeeds")
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(by_last, vec![PersonId(1), PersonId(2), PersonId(3)]);
    }

    #[test]
    fn create_rejects_duplicate_ids() {
        let mut repo = sample();
        let err = repo
            .create(&Person::new(PersonId(1), "Someone", "Else"))
            .expect_err("duplicate id must fail");
        assert!(matches!(err, ContactsError::Storage(_)));
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn remove_then_find_returns_none() {
        let mut repo = sample();
        let ada = repo.find_by_id(PersonId(2)).expect("find").expect("ada exists");
        repo.remove(&ada).expect("remove succeeds");
        assert_eq!(repo.find_by_id(PersonId(2)).expect("find"), None);

        let err = repo.remove(&ada).expect_err("second remove fails");
        assert!(matches!(err, ContactsError::NotFound { .. }));
    }

    #[test]
    fn update_replaces_fields() {
        let mut repo = sample();
        let mut alan = repo.find_by_id(PersonId(3)).expect("find").expect("alan exists");
        alan.email = "alan@bletchley.uk".into();
        repo.update(&alan).expect("update succeeds");
        assert_eq!(
            repo.find_by_id(PersonId(3)).expect("find").map(|p| p.email),
            Some("alan@bletchley.uk".to_string())
        );
    }

    #[test]
    fn injected_failures_are_returned_not_panicked() {
        let repo = sample().failing(RepositoryOperation::List);
        let err = repo
            .list_sorted_by(&|p| SortKey::FirstName.key_for(p))
            .expect_err("list is configured to fail");
        assert!(err.to_string().contains("List"));
    }
}
