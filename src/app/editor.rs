//! Person editor form.
//!
//! The form holds raw text for every editable field. Saving validates all
//! fields; the first failure is returned as a validation error and every
//! failure is kept so the editor screen can show it next to the field.

use crate::app::validation::{self, Validator};
use crate::domain::error::{ContactsError, Result};
use crate::domain::{Person, PersonId};
use std::collections::BTreeMap;

/// Editable fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PersonField {
    FirstName,
    LastName,
    Email,
    Phone,
}

impl PersonField {
    pub const ALL: [Self; 4] = [Self::FirstName, Self::LastName, Self::Email, Self::Phone];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "E-mail",
            Self::Phone => "Phone",
        }
    }

    /// Parses the short names used by the command line (`first`, `email`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "first" | "first_name" => Some(Self::FirstName),
            "last" | "last_name" => Some(Self::LastName),
            "email" | "e-mail" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            _ => None,
        }
    }

    #[must_use]
    pub fn validator(self) -> Validator {
        match self {
            Self::FirstName => validation::first_name,
            Self::LastName => validation::last_name,
            Self::Email => validation::email,
            Self::Phone => validation::phone,
        }
    }
}

/// State of the person editor screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonForm {
    /// Person being edited; `None` while creating.
    pub original: Option<Person>,
    values: BTreeMap<PersonField, String>,
    errors: BTreeMap<PersonField, String>,
}

impl PersonForm {
    /// Empty form for a new person.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing person.
    #[must_use]
    pub fn from_person(person: &Person) -> Self {
        let values = BTreeMap::from([
            (PersonField::FirstName, person.first_name.clone()),
            (PersonField::LastName, person.last_name.clone()),
            (PersonField::Email, person.email.clone()),
            (PersonField::Phone, person.phone.clone()),
        ]);
        Self {
            original: Some(person.clone()),
            values,
            errors: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        self.original.is_none()
    }

    /// Id of the person being edited.
    #[must_use]
    pub fn editing(&self) -> Option<PersonId> {
        self.original.as_ref().map(|person| person.id)
    }

    #[must_use]
    pub fn value(&self, field: PersonField) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// Replaces a field's text and clears its previous error.
    pub fn set(&mut self, field: PersonField, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.errors.remove(&field);
    }

    #[must_use]
    pub fn error(&self, field: PersonField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Runs every validator.
    ///
    /// # Errors
    ///
    /// Returns [`ContactsError::Validation`] for the first invalid field in
    /// display order.
    pub fn validate(&mut self) -> Result<()> {
        self.errors.clear();
        for field in PersonField::ALL {
            let check = (field.validator())(self.value(field));
            if check.invalid {
                self.errors.insert(field, check.message);
            }
        }

        match self.errors.iter().next() {
            Some((field, message)) => {
                tracing::debug!(field = field.label(), invalid_fields = self.errors.len(), "form rejected");
                Err(ContactsError::Validation {
                    field: field.label(),
                    message: message.clone(),
                })
            }
            None => Ok(()),
        }
    }

    /// Builds the person to store. `new_id` is only called when creating.
    #[must_use]
    pub fn to_person(&self, new_id: impl FnOnce() -> PersonId) -> Person {
        let first = self.value(PersonField::FirstName).trim();
        let last = self.value(PersonField::LastName).trim();
        let email = self.value(PersonField::Email).trim();
        let phone = self.value(PersonField::Phone).trim();

        match &self.original {
            Some(original) => Person {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                ..original.clone()
            },
            None => Person::new(new_id(), first, last).with_email(email).with_phone(phone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_invalid_field_is_reported() {
        let mut form = PersonForm::blank();
        form.set(PersonField::Email, "not-an-address");

        let err = form.validate().expect_err("blank names must fail");
        assert!(matches!(err, ContactsError::Validation { field: "First name", .. }));
        assert!(form.error(PersonField::LastName).is_some());
        assert!(form.error(PersonField::Email).is_some());
        assert_eq!(form.error(PersonField::Phone), None);
    }

    #[test]
    fn editing_keeps_identity_and_creation_time() {
        let ada = Person::new(PersonId(4), "Ada", "Byron");
        let mut form = PersonForm::from_person(&ada);
        form.set(PersonField::LastName, " Lovelace ");
        form.validate().expect("form is valid");

        let saved = form.to_person(|| unreachable!("existing person keeps its id"));
        assert_eq!(saved.id, PersonId(4));
        assert_eq!(saved.created_at, ada.created_at);
        assert_eq!(saved.last_name, "Lovelace");
    }

    #[test]
    fn setting_a_field_clears_its_error() {
        let mut form = PersonForm::blank();
        assert!(form.validate().is_err());
        form.set(PersonField::FirstName, "Grace");
        assert_eq!(form.error(PersonField::FirstName), None);
        assert!(form.error(PersonField::LastName).is_some());
    }
}
