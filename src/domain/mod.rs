//! Domain layer for the contact book.
//!
//! This module contains the core domain types, independent of navigation,
//! persistence, or presentation concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types, categories and result aliases
//! - [`person`]: Person entity and identifier
//! - [`destination`]: Navigation destination keys
//!
//! # Examples
//!
//! ```
//! use contactbook::domain::{Person, PersonId, Result};
//!
//! fn create_person() -> Result<Person> {
//!     Ok(Person::new(PersonId(1), "Ada", "Lovelace"))
//! }
//! ```

pub mod destination;
pub mod error;
pub mod person;

pub use destination::Destination;
pub use error::{ContactsError, ErrorCategory, Result};
pub use person::{Person, PersonId};
