//! Plain-text screen renderer.
//!
//! Rendering is split into the same two steps as everywhere else in the UI:
//!
//! 1. **View Model Computation**: `AppState` → [`ScreenViewModel`]
//! 2. **Section Rendering**: tabs, breadcrumb, body, notification, footer
//!
//! Output is a list of lines so callers decide where it goes.

use crate::app::AppState;
use crate::events::NotificationKind;
use crate::ui::helpers::{fit, highlight};
use crate::ui::viewmodel::{
    EmptyState, FieldRow, NotificationView, PersonDetailView, PersonRow, ScreenContent,
    ScreenViewModel, TabItem,
};

const NAME_WIDTH: usize = 28;
const RULE: &str = "----------------------------------------";

/// Renders `state` as one newline-joined frame.
#[must_use]
pub fn render(state: &AppState) -> String {
    render_viewmodel(&state.compute_viewmodel()).join("\n")
}

/// Renders a view model into lines.
///
/// # Example
///
/// ```rust
/// use contactbook::{AppState, ui::render_viewmodel};
///
/// let state = AppState::default();
/// let lines = render_viewmodel(&state.compute_viewmodel());
/// assert!(lines[0].contains("[People]"));
/// ```
#[must_use]
pub fn render_viewmodel(vm: &ScreenViewModel) -> Vec<String> {
    let mut lines = vec![render_tabs(&vm.tabs), vm.breadcrumb.join(" > "), RULE.to_string()];

    render_content(&vm.content, &mut lines);

    lines.push(RULE.to_string());
    if let Some(notification) = &vm.notification {
        lines.push(render_notification(notification));
    }
    lines.push(vm.footer.keybindings.clone());
    lines
}

fn render_tabs(tabs: &[TabItem]) -> String {
    tabs.iter()
        .map(|tab| {
            if tab.active {
                format!("[{}]", tab.title)
            } else {
                format!(" {} ", tab.title)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_content(content: &ScreenContent, lines: &mut Vec<String>) {
    match content {
        ScreenContent::People { rows, search_bar, empty_state } => {
            if let Some(search) = search_bar {
                lines.push(format!("/ {}", search.query));
            }
            if let Some(empty) = empty_state {
                render_empty(empty, lines);
            }
            lines.extend(rows.iter().map(render_person_row));
        }
        ScreenContent::PersonDetail(detail) => render_detail(detail, lines),
        ScreenContent::Loading { message } => lines.push(message.clone()),
        ScreenContent::Editor { is_new, fields } => {
            lines.push(if *is_new { "New person" } else { "Edit person" }.to_string());
            lines.extend(fields.iter().map(render_field));
        }
        ScreenContent::Settings { sort_key, options } => {
            for option in options {
                let marker = if option == sort_key { '*' } else { ' ' };
                lines.push(format!("{marker} sort by {option}"));
            }
        }
        ScreenContent::About { lines: about } => lines.extend(about.iter().cloned()),
    }
}

fn render_empty(empty: &EmptyState, lines: &mut Vec<String>) {
    lines.push(empty.message.clone());
    if !empty.subtitle.is_empty() {
        lines.push(empty.subtitle.clone());
    }
}

fn render_person_row(row: &PersonRow) -> String {
    let name = highlight(&row.name, &row.highlight_ranges);
    let width = NAME_WIDTH + 2 * row.highlight_ranges.len();
    let marker = if row.just_restored { '+' } else { ' ' };
    format!("{marker} #{:<4} {} {}", row.id.0, fit(&name, width), row.email)
        .trim_end()
        .to_string()
}

fn render_detail(detail: &PersonDetailView, lines: &mut Vec<String>) {
    lines.push(detail.name.clone());
    lines.push(format!("  email    {}", detail.email));
    lines.push(format!("  phone    {}", detail.phone));
    lines.push(format!("  created  {}", detail.created));
    lines.push(format!("  updated  {}", detail.updated));
}

fn render_field(field: &FieldRow) -> String {
    let base = format!("  {:<12} {}", field.label, field.value);
    match &field.error {
        Some(error) => format!("{base}  ! {error}"),
        None => base,
    }
}

fn render_notification(notification: &NotificationView) -> String {
    let prefix = match notification.kind {
        NotificationKind::Error(_) => "!",
        NotificationKind::Info | NotificationKind::UndoPrompt => "*",
    };
    let mut line = format!("{prefix} {}", notification.message);
    if let Some(label) = &notification.action_label {
        line.push_str(&format!("  [{label}]"));
    }
    if notification.dismissible {
        line.push_str("  [x]");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PersonId;
    use crate::ui::viewmodel::FooterInfo;
    use pretty_assertions::assert_eq;

    fn frame(content: ScreenContent, notification: Option<NotificationView>) -> ScreenViewModel {
        ScreenViewModel {
            tabs: vec![
                TabItem { title: "People".into(), active: true },
                TabItem { title: "Settings".into(), active: false },
            ],
            breadcrumb: vec!["People".into(), "Person #2".into()],
            content,
            notification,
            footer: FooterInfo { keybindings: "back  quit".into() },
        }
    }

    #[test]
    fn renders_rows_with_highlights_and_restored_marker() {
        let rows = vec![
            PersonRow {
                id: PersonId(1),
                name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                highlight_ranges: vec![(0, 3)],
                just_restored: false,
            },
            PersonRow {
                id: PersonId(12),
                name: "Grace Hopper".into(),
                email: String::new(),
                highlight_ranges: vec![],
                just_restored: true,
            },
        ];
        let lines = render_viewmodel(&frame(
            ScreenContent::People { rows, search_bar: None, empty_state: None },
            None,
        ));

        assert_eq!(lines[0], "[People]  Settings ");
        assert_eq!(lines[1], "People > Person #2");
        assert!(lines[3].starts_with("  #1    [Ada] Lovelace"));
        assert!(lines[3].ends_with("ada@example.com"));
        assert_eq!(lines[4], "+ #12   Grace Hopper");
        assert_eq!(lines.last().map(String::as_str), Some("back  quit"));
    }

    #[test]
    fn renders_undo_prompt_and_field_errors() {
        let notification = NotificationView {
            id: crate::events::NotificationId(4),
            message: "Removed Ada Lovelace".into(),
            kind: NotificationKind::UndoPrompt,
            action_label: Some("Undo".into()),
            dismissible: true,
        };
        let fields = vec![FieldRow {
            label: "Email".into(),
            value: "nope".into(),
            error: Some("Email is not valid".into()),
        }];
        let lines = render_viewmodel(&frame(
            ScreenContent::Editor { is_new: true, fields },
            Some(notification),
        ));

        assert_eq!(lines[3], "New person");
        assert_eq!(lines[4], "  Email        nope  ! Email is not valid");
        assert_eq!(lines[6], "* Removed Ada Lovelace  [Undo]  [x]");
    }
}
