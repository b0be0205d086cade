//! Input mode of the people list.
//!
//! In `Search` mode the list is filtered by the current query and matching
//! characters are highlighted; `Normal` shows every person.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}
