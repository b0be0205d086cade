//! Repository abstraction.
//!
//! This module defines the [`Repository`] trait the application consumes for
//! person persistence. Every operation returns a [`Result`]; failures are
//! reported as values and never escape as panics.
//!
//! # Design Philosophy
//!
//! The trait is minimal and maps one-to-one onto the operations the persistence
//! worker performs. Sorting is expressed as a key function so backends do not
//! need to know about presentation order.

use crate::domain::error::Result;
use crate::domain::{Person, PersonId};
use serde::{Deserialize, Serialize};

/// Key function handed to [`Repository::list_sorted_by`].
pub type SortKeyFn<'a> = &'a dyn Fn(&Person) -> String;

/// Abstraction over person storage backends.
///
/// Implementations are moved onto the worker thread, hence `Send`.
///
/// # Implementations
///
/// - [`MemoryRepository`](crate::storage::MemoryRepository): in-process map
pub trait Repository: Send {
    /// Stores a new person.
    ///
    /// # Errors
    ///
    /// Returns an error if a person with the same id already exists or the
    /// backend fails.
    fn create(&mut self, person: &Person) -> Result<()>;

    /// Replaces an existing person.
    ///
    /// # Errors
    ///
    /// Returns an error if the person does not exist or the backend fails.
    fn update(&mut self, person: &Person) -> Result<()>;

    /// Deletes a person.
    ///
    /// # Errors
    ///
    /// Returns an error if the person does not exist or the backend fails.
    fn remove(&mut self, person: &Person) -> Result<()>;

    /// Looks a person up by id; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn find_by_id(&self, id: PersonId) -> Result<Option<Person>>;

    /// Lists every person ordered by `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_sorted_by(&self, key: SortKeyFn<'_>) -> Result<Vec<Person>>;
}

/// Presentation order of the people list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    FirstName,
    LastName,
}

impl SortKey {
    /// Case-insensitive sort key for `person`.
    #[must_use]
    pub fn key_for(self, person: &Person) -> String {
        let (primary, secondary) = match self {
            Self::FirstName => (&person.first_name, &person.last_name),
            Self::LastName => (&person.last_name, &person.first_name),
        };
        format!("{}\u{0}{}", primary.to_lowercase(), secondary.to_lowercase())
    }

    /// Parses `first`/`last` (and the snake_case config spelling).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "first" | "first_name" => Some(Self::FirstName),
            "last" | "last_name" => Some(Self::LastName),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "first name",
            Self::LastName => "last name",
        }
    }
}
