//! Person domain model.
//!
//! A [`Person`] is the single entity managed by the contact book. Identity is the
//! [`PersonId`]; every other field is editable through the person editor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of a stored person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(pub u64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PersonId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

/// A contact record.
///
/// # Fields
///
/// - `id`: Identity used for equality checks in lists and the repository
/// - `first_name` / `last_name`: Required name parts
/// - `email` / `phone`: Optional contact details, empty when unset
/// - `created_at` / `updated_at`: Unix timestamps maintained by the editor flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Person {
    /// Creates a person with empty contact details and both timestamps set to now.
    ///
    /// # Examples
    ///
    /// ```
    /// use contactbook::domain::{Person, PersonId};
    ///
    /// let person = Person::new(PersonId(1), "Ada", "Lovelace");
    /// assert_eq!(person.display_name(), "Ada Lovelace");
    /// assert!(person.email.is_empty());
    /// ```
    #[must_use]
    pub fn new(id: PersonId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: String::new(),
            phone: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the e-mail address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Full name as shown in lists and notifications.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Marks the record as modified now.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_trims_missing_parts() {
        let person = Person::new(PersonId(3), "  Grace", "");
        assert_eq!(person.display_name(), "Grace");
    }

    #[test]
    fn person_id_parses_from_command_text() {
        assert_eq!(" 12 ".parse::<PersonId>(), Ok(PersonId(12)));
        assert!("twelve".parse::<PersonId>().is_err());
    }

    #[test]
    fn touch_never_moves_updated_at_backwards() {
        let mut person = Person::new(PersonId(1), "Alan", "Turing");
        let before = person.updated_at;
        person.touch();
        assert!(person.updated_at >= before);
        assert_eq!(person.created_at, before);
    }
}
