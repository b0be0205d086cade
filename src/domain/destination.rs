//! Navigation destinations of the contact book.
//!
//! A [`Destination`] is the key stored in back stacks. Two keys are equal when
//! both the screen kind and its parameters match, so `PersonDetail(PersonId(1))`
//! and `PersonDetail(PersonId(2))` are distinct entries.

use super::person::PersonId;
use serde::{Deserialize, Serialize};

/// A navigable screen plus its parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    /// People list. The default top-level destination.
    #[default]
    People,
    /// Application settings tab.
    Settings,
    /// About tab.
    About,
    /// Read-only view of one person.
    PersonDetail(PersonId),
    /// Person form; `None` creates a new person.
    PersonEditor(Option<PersonId>),
}

impl Destination {
    /// Top-level destinations, in tab order. The first one is the default.
    pub const TOP_LEVEL: [Self; 3] = [Self::People, Self::Settings, Self::About];

    /// Whether this destination owns its own back stack.
    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        matches!(self, Self::People | Self::Settings | Self::About)
    }

    /// Screen title used in breadcrumbs.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::People => "People".to_string(),
            Self::Settings => "Settings".to_string(),
            Self::About => "About".to_string(),
            Self::PersonDetail(id) => format!("Person #{id}"),
            Self::PersonEditor(Some(id)) => format!("Edit #{id}"),
            Self::PersonEditor(None) => "New person".to_string(),
        }
    }

    /// Parses a tab name as typed by the user.
    #[must_use]
    pub fn top_level_from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "people" | "home" => Some(Self::People),
            "settings" => Some(Self::Settings),
            "about" => Some(Self::About),
            _ => None,
        }
    }
}
