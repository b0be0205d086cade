//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth owned by the UI thread. It holds
//! the navigation registry, the notification channel, the displayed people list
//! with its removal coordinator, and per-screen state (detail, editor, search).
//! View models are computed on demand from it.
//!
//! # Example
//!
//! ```rust
//! use contactbook::app::AppState;
//! use contactbook::domain::Destination;
//!
//! let state = AppState::default();
//! assert_eq!(state.navigation.current(), Destination::People);
//! let viewmodel = state.compute_viewmodel();
//! assert_eq!(viewmodel.breadcrumb, vec!["People".to_string()]);
//! ```

use super::editor::{PersonField, PersonForm};
use super::modes::InputMode;
use super::removal::RemovalCoordinator;
use crate::domain::{Destination, Person, PersonId};
use crate::events::{EventChannel, NotificationTimings};
use crate::navigation::TopLevelRegistry;
use crate::storage::SortKey;
use crate::ui::viewmodel::{
    EmptyState, FieldRow, FooterInfo, NotificationView, PersonDetailView, PersonRow,
    ScreenContent, ScreenViewModel, SearchBarInfo, TabItem,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Back stacks of every visited tab and the derived effective stack.
    pub navigation: TopLevelRegistry<Destination>,

    /// Single-slot notification channel shared with the presentation.
    pub events: EventChannel,

    /// Displayed people list, in repository order.
    ///
    /// Replaced when the worker delivers `PeopleLoaded`; edited in place by
    /// optimistic removal and undo.
    pub people: Vec<Person>,

    pub removals: RemovalCoordinator<Person>,

    /// Form of the editor screen, if one is open on the People stack.
    pub editor: Option<PersonForm>,

    /// Last person delivered for the detail screen.
    pub detail: Option<Person>,

    pub input_mode: InputMode,

    /// Current search query string; only applied in search mode.
    pub search_query: String,

    pub sort_key: SortKey,

    pub timings: NotificationTimings,

    next_person_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SortKey::default(), NotificationTimings::default())
    }
}

impl AppState {
    /// Creates a state on the People tab with an empty list.
    #[must_use]
    pub fn new(sort_key: SortKey, timings: NotificationTimings) -> Self {
        Self {
            navigation: TopLevelRegistry::new(Destination::People),
            events: EventChannel::new(),
            people: Vec::new(),
            removals: RemovalCoordinator::new(),
            editor: None,
            detail: None,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            sort_key,
            timings,
            next_person_id: 1,
        }
    }

    /// Hands out an id that no known person uses.
    pub fn allocate_person_id(&mut self) -> PersonId {
        let id = PersonId(self.next_person_id);
        self.next_person_id += 1;
        id
    }

    /// Replaces the displayed list with freshly loaded people.
    ///
    /// A person whose removal is still pending stays hidden, since the load may
    /// have been answered before the removal reached the repository.
    pub fn replace_people(&mut self, people: &[Person]) {
        let hidden = self.removals.pending().map(|pending| pending.entity.id);
        self.people = people
            .iter()
            .filter(|person| Some(person.id) != hidden)
            .cloned()
            .collect();

        if let Some(max) = people.iter().map(|person| person.id.0).max() {
            self.next_person_id = self.next_person_id.max(max + 1);
        }
        tracing::debug!(count = self.people.len(), hidden = ?hidden, "people list replaced");
    }

    /// People matching the search query, in list order.
    ///
    /// Every whitespace-separated token must fuzzy-match the display name.
    #[must_use]
    pub fn visible_people(&self) -> Vec<&Person> {
        let tokens: Vec<String> = if self.input_mode == InputMode::Search {
            self.search_query
                .split_whitespace()
                .map(str::to_lowercase)
                .collect()
        } else {
            vec![]
        };

        if tokens.is_empty() {
            return self.people.iter().collect();
        }

        let matcher = SkimMatcherV2::default();
        self.people
            .iter()
            .filter(|person| {
                let name = person.display_name().to_lowercase();
                tokens.iter().all(|token| matcher.fuzzy_match(&name, token).is_some())
            })
            .collect()
    }

    /// Computes the renderable view model for the screen on top.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ScreenViewModel {
        let current = self.navigation.current();
        let active = self.navigation.active_key();

        let tabs = Destination::TOP_LEVEL
            .iter()
            .map(|tab| TabItem {
                title: tab.title(),
                active: tab == active,
            })
            .collect();

        let breadcrumb = self
            .navigation
            .effective_stack()
            .iter()
            .map(Destination::title)
            .collect();

        let notification = self.events.current().map(|n| NotificationView {
            id: n.id,
            message: n.message,
            kind: n.kind,
            action_label: n.action.map(|action| action.label),
            dismissible: n.dismissible,
        });

        ScreenViewModel {
            tabs,
            breadcrumb,
            content: self.compute_content(&current),
            notification,
            footer: self.compute_footer(&current),
        }
    }

    fn compute_content(&self, current: &Destination) -> ScreenContent {
        match current {
            Destination::People => self.compute_people(),
            Destination::PersonDetail(id) => match &self.detail {
                Some(person) if person.id == *id => {
                    ScreenContent::PersonDetail(Self::compute_detail(person))
                }
                _ => ScreenContent::Loading {
                    message: format!("Loading person {id}..."),
                },
            },
            Destination::PersonEditor(_) => {
                let form = self.editor.clone().unwrap_or_default();
                let fields = PersonField::ALL
                    .iter()
                    .map(|&field| FieldRow {
                        label: field.label().to_string(),
                        value: form.value(field).to_string(),
                        error: form.error(field).map(String::from),
                    })
                    .collect();
                ScreenContent::Editor {
                    is_new: form.is_new(),
                    fields,
                }
            }
            Destination::Settings => ScreenContent::Settings {
                sort_key: self.sort_key.label().to_string(),
                options: [SortKey::FirstName, SortKey::LastName]
                    .iter()
                    .map(|key| key.label().to_string())
                    .collect(),
            },
            Destination::About => ScreenContent::About {
                lines: vec![
                    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
                    "A small contact book with per-tab history and undoable removal.".to_string(),
                ],
            },
        }
    }

    fn compute_people(&self) -> ScreenContent {
        let searching = self.input_mode == InputMode::Search;
        let matcher = (searching && !self.search_query.trim().is_empty()).then(SkimMatcherV2::default);
        let restored = self.removals.just_restored();

        let rows: Vec<PersonRow> = self
            .visible_people()
            .into_iter()
            .map(|person| {
                let name = person.display_name();
                let highlight_ranges = matcher
                    .as_ref()
                    .map_or_else(Vec::new, |m| self.compute_highlight_ranges(&name, m));
                PersonRow {
                    id: person.id,
                    email: person.email.clone(),
                    just_restored: restored == Some(&person.id),
                    name,
                    highlight_ranges,
                }
            })
            .collect();

        let empty_state = if !rows.is_empty() {
            None
        } else if self.people.is_empty() {
            Some(EmptyState {
                message: "No people yet".to_string(),
                subtitle: "Use `new` to add someone".to_string(),
            })
        } else {
            Some(EmptyState {
                message: "No matches".to_string(),
                subtitle: format!("Nobody matches \"{}\"", self.search_query),
            })
        };

        ScreenContent::People {
            rows,
            search_bar: searching.then(|| SearchBarInfo {
                query: self.search_query.clone(),
            }),
            empty_state,
        }
    }

    fn compute_detail(person: &Person) -> PersonDetailView {
        let format_time = |timestamp: i64| {
            chrono::DateTime::from_timestamp(timestamp, 0)
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default()
        };
        PersonDetailView {
            id: person.id,
            name: person.display_name(),
            email: person.email.clone(),
            phone: person.phone.clone(),
            created: format_time(person.created_at),
            updated: format_time(person.updated_at),
        }
    }

    /// Coalesces fuzzy match indices into `(start, end)` character ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        let Some((_score, indices)) = matcher.fuzzy_indices(text, self.search_query.trim()) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_footer(&self, current: &Destination) -> FooterInfo {
        let keybindings = match current {
            Destination::People if self.input_mode == InputMode::Search => {
                "search <query>  search (exit)  open <id>  rm <id>  back"
            }
            Destination::People => "open <id>  new  rm <id>  undo  search <query>  tab <name>  quit",
            Destination::PersonDetail(_) => "edit  rm  back  tab <name>  quit",
            Destination::PersonEditor(_) => "set <field> <value>  save  back",
            Destination::Settings => "sort first|last  back  tab <name>  quit",
            Destination::About => "back  tab <name>  quit",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with_people() -> AppState {
        let mut state = AppState::default();
        state.replace_people(&[
            Person::new(PersonId(1), "Ada", "Lovelace"),
            Person::new(PersonId(2), "Grace", "Hopper"),
            Person::new(PersonId(5), "Alan", "Turing"),
        ]);
        state
    }

    #[test]
    fn loading_people_advances_id_allocation() {
        let mut state = with_people();
        assert_eq!(state.allocate_person_id(), PersonId(6));
        assert_eq!(state.allocate_person_id(), PersonId(7));
    }

    #[test]
    fn search_filters_and_highlights() {
        let mut state = with_people();
        state.input_mode = InputMode::Search;
        state.search_query = "gr".to_string();

        let ScreenContent::People { rows, search_bar, .. } = state.compute_viewmodel().content else {
            panic!("people screen expected");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Grace Hopper");
        assert_eq!(rows[0].highlight_ranges, vec![(0, 2)]);
        assert_eq!(search_bar.map(|bar| bar.query), Some("gr".to_string()));
    }

    #[test]
    fn query_is_ignored_outside_search_mode() {
        let mut state = with_people();
        state.search_query = "zzz".to_string();
        assert_eq!(state.visible_people().len(), 3);
    }

    #[test]
    fn pending_removal_stays_hidden_after_reload() {
        let mut state = with_people();
        let mut people = state.people.clone();
        state.removals.remove(&mut people, &PersonId(2));

        let loaded = state.people.clone();
        state.replace_people(&loaded);
        let ids: Vec<PersonId> = state.people.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PersonId(1), PersonId(5)]);
    }

    #[test]
    fn detail_screen_shows_loading_until_person_arrives() {
        let mut state = with_people();
        state.navigation.push(Destination::PersonDetail(PersonId(1)));
        assert!(matches!(state.compute_viewmodel().content, ScreenContent::Loading { .. }));

        state.detail = state.people.first().cloned();
        let ScreenContent::PersonDetail(view) = state.compute_viewmodel().content else {
            panic!("detail expected");
        };
        assert_eq!(view.name, "Ada Lovelace");
        assert_eq!(
            state.compute_viewmodel().breadcrumb,
            vec!["People".to_string(), "Person #1".to_string()]
        );
    }
}
