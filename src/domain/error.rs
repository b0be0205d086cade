//! Error types for the contact book.
//!
//! This module defines the centralized error type [`ContactsError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Errors never cross the repository boundary as panics: repository calls return
//! them, the event handler converts them into user-facing notifications.

use thiserror::Error;

/// The main error type for contact book operations.
///
/// # Examples
///
/// ```
/// use contactbook::domain::{ContactsError, ErrorCategory};
///
/// let err = ContactsError::NotFound { entity: "person", id: "42".to_string() };
/// assert_eq!(err.category(), ErrorCategory::NotFound);
/// ```
#[derive(Debug, Error)]
pub enum ContactsError {
    /// Repository operation failed.
    ///
    /// The string describes which operation failed and why.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A lookup produced no entity.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of entity that was looked up (e.g. `"person"`).
        entity: &'static str,
        /// Identifier that produced no result.
        id: String,
    },

    /// A form field failed validation.
    #[error("{field}: {message}")]
    Validation {
        /// Human-readable field label.
        field: &'static str,
        /// Message produced by the field validator.
        message: String,
    },

    /// Communication with the persistence worker failed.
    ///
    /// Occurs when the worker thread has exited or its channel is closed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// User-facing classification of an error.
///
/// Each category decides how the error is surfaced: whether a notification is
/// shown and whether dismissing it navigates away from the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A lookup failed; dismissing the notification returns to a safe root.
    NotFound,
    /// A repository or worker call failed; the user stays where they are.
    Persistence,
    /// Input was rejected; the user must correct it in place.
    Validation,
}

impl ContactsError {
    /// Returns the user-facing category of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::Storage(_) | Self::Worker(_) | Self::Config(_) | Self::Io(_) => {
                ErrorCategory::Persistence
            }
        }
    }
}

/// A specialized `Result` type for contact book operations.
pub type Result<T> = std::result::Result<T, ContactsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_taxonomy() {
        assert_eq!(
            ContactsError::Storage("disk full".into()).category(),
            ErrorCategory::Persistence
        );
        assert_eq!(
            ContactsError::Validation { field: "Email", message: "bad".into() }.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            ContactsError::Worker("gone".into()).category(),
            ErrorCategory::Persistence
        );
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = ContactsError::NotFound { entity: "person", id: "7".into() };
        assert_eq!(err.to_string(), "person 7 not found");
    }
}
