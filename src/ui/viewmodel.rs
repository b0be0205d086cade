//! View model types representing renderable screen state.
//!
//! View models are computed from `AppState::compute_viewmodel()` and consumed
//! by the renderer. They contain no business logic, only display-ready data:
//! titles are resolved, timestamps formatted and search highlights computed.

use crate::domain::PersonId;
use crate::events::{NotificationId, NotificationKind};

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenViewModel {
    /// Top-level destinations in display order.
    pub tabs: Vec<TabItem>,

    /// Titles of the effective stack, root first.
    pub breadcrumb: Vec<String>,

    /// Screen-specific body.
    pub content: ScreenContent,

    /// Notification currently pending in the event channel.
    pub notification: Option<NotificationView>,

    /// Command hints for the current screen.
    pub footer: FooterInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabItem {
    pub title: String,
    pub active: bool,
}

/// Body of the screen on top of the effective stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenContent {
    People {
        rows: Vec<PersonRow>,
        /// Present while searching.
        search_bar: Option<SearchBarInfo>,
        empty_state: Option<EmptyState>,
    },
    PersonDetail(PersonDetailView),
    /// A lookup is in flight.
    Loading { message: String },
    Editor { is_new: bool, fields: Vec<FieldRow> },
    Settings { sort_key: String, options: Vec<String> },
    About { lines: Vec<String> },
}

/// One row of the people list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRow {
    pub id: PersonId,
    pub name: String,
    pub email: String,

    /// Character ranges to highlight (for fuzzy search matches).
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,

    /// Set for the row that was just brought back by undo.
    pub just_restored: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDetailView {
    pub id: PersonId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created: String,
    pub updated: String,
}

/// One editable field with its validation message, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub label: String,
    pub value: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub action_label: Option<String>,
    pub dismissible: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command help text (e.g., "open <id>  new  quit").
    pub keybindings: String,
}

/// Shown when the list has nothing to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No people yet").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
}
