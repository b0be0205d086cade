//! Contactbook: a contact manager core with tabbed navigation history,
//! single-slot user notifications and optimistic removal with undo.
//!
//! The crate provides:
//! - Per-tab back stacks with a default tab whose history stays underneath
//! - A replay-latest notification channel where the newest message wins
//! - Optimistic list removal with an undo window and exact-position restore
//! - A persistence worker on its own thread behind a repository trait
//! - A fault guard turning failures into notifications instead of crashes

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Line-command shell (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling behind the fault guard            │
//! │  - Removal coordinator and person editor            │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!      │               │                │               │
//! ┌───────────┐ ┌─────────────┐ ┌──────────────┐ ┌─────────────┐
//! │ navigation│ │ events      │ │ worker       │ │ ui          │
//! │ - stacks  │ │ - channel   │ │ - messages   │ │ - renderer  │
//! │ - registry│ │ - payloads  │ │ - thread     │ │ - presenter │
//! └───────────┘ └─────────────┘ └──────────────┘ └─────────────┘
//!                                      │
//! ┌─────────────────────────────────────────────────────┐
//! │  storage/ · domain/ · infrastructure/               │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Person, destinations, errors
//! - [`navigation`]: Back stacks and the top-level registry
//! - [`events`]: Notification payloads and the event channel
//! - [`storage`]: Repository trait and the in-memory backend
//! - [`worker`]: Persistence worker thread and its messages
//! - [`ui`]: View models, plain-text rendering, notification timing
//! - [`infrastructure`]: Data directory resolution
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! ```toml
//! sort_key = "last_name"
//! trace_level = "debug"
//! data_dir = "~/.local/share/contactbook"
//! short_notification_ms = 4000
//! long_notification_ms = 10000
//! ```
//!
//! # Example
//!
//! ```rust
//! use contactbook::{initialize, dispatch, Action, Config, Event};
//! use contactbook::domain::{Destination, PersonId};
//!
//! let mut state = initialize(&Config::default());
//!
//! let (redraw, actions) = dispatch(&mut state, &Event::OpenPerson(PersonId(7)));
//! assert!(redraw);
//! assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
//! assert_eq!(state.navigation.current(), Destination::PersonDetail(PersonId(7)));
//! ```

pub mod app;
pub mod domain;
pub mod events;
pub mod infrastructure;
pub mod navigation;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{dispatch, handle_event, Action, AppState, Event, InputMode};
pub use domain::{ContactsError, Result};

use crate::events::NotificationTimings;
use crate::storage::SortKey;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_SHORT_NOTIFICATION_MS: u64 = 4_000;
const DEFAULT_LONG_NOTIFICATION_MS: u64 = 10_000;

/// Application configuration.
///
/// Every field is optional in both sources; missing or unparsable values fall
/// back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Order of the people list. Default: first name.
    pub sort_key: SortKey,

    /// Tracing level for the trace file.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Trace file location. Defaults to a file in the data directory.
    pub trace_file: Option<PathBuf>,

    /// Data directory override. See [`infrastructure::get_data_dir`].
    pub data_dir: Option<PathBuf>,

    /// Display time of short notifications, in milliseconds.
    pub short_notification_ms: u64,

    /// Display time of long notifications (errors), in milliseconds.
    pub long_notification_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sort_key: SortKey::default(),
            trace_level: None,
            trace_file: None,
            data_dir: None,
            short_notification_ms: DEFAULT_SHORT_NOTIFICATION_MS,
            long_notification_ms: DEFAULT_LONG_NOTIFICATION_MS,
        }
    }
}

impl Config {
    /// Parses configuration from a string map, such as `key=value` pairs.
    ///
    /// # Parsing Rules
    ///
    /// - `sort_key`: `first`/`last` (or `first_name`/`last_name`), else default
    /// - `trace_level`, `trace_file`, `data_dir`: taken verbatim
    /// - `short_notification_ms`, `long_notification_ms`: `u64`, else default
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use contactbook::{storage::SortKey, Config};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("sort_key".to_string(), "last".to_string());
    /// map.insert("short_notification_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.sort_key, SortKey::LastName);
    /// assert_eq!(config.short_notification_ms, 4000);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str, fallback: u64| {
            map.get(key)
                .and_then(|value| value.trim().parse::<u64>().ok())
                .unwrap_or(fallback)
        };

        Self {
            sort_key: map
                .get("sort_key")
                .and_then(|value| SortKey::from_name(value))
                .unwrap_or(defaults.sort_key),
            trace_level: map.get("trace_level").cloned(),
            trace_file: map.get("trace_file").map(PathBuf::from),
            data_dir: map.get("data_dir").map(PathBuf::from),
            short_notification_ms: millis("short_notification_ms", defaults.short_notification_ms),
            long_notification_ms: millis("long_notification_ms", defaults.long_notification_ms),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ContactsError::Io`] if the file cannot be read and
    /// [`ContactsError::Config`] if it is not valid TOML for this struct.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ContactsError::Config(format!("{}: {e}", path.display())))
    }

    /// Notification delays derived from the configured milliseconds.
    #[must_use]
    pub const fn timings(&self) -> NotificationTimings {
        NotificationTimings {
            short: Duration::from_millis(self.short_notification_ms),
            long: Duration::from_millis(self.long_notification_ms),
        }
    }
}

/// Creates the application state for `config`.
///
/// The people list starts empty; the caller posts the initial load to the
/// worker.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(sort_key = ?config.sort_key, "initializing contactbook");
    AppState::new(config.sort_key, config.timings())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn from_file_reads_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "sort_key = \"last_name\"\nlong_notification_ms = 2500").expect("write");

        let config = Config::from_file(file.path()).expect("valid config");
        assert_eq!(config.sort_key, SortKey::LastName);
        assert_eq!(config.long_notification_ms, 2500);
        assert_eq!(config.short_notification_ms, DEFAULT_SHORT_NOTIFICATION_MS);
        assert_eq!(config.timings().long, Duration::from_millis(2500));
    }

    #[test]
    fn from_file_rejects_bad_values() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "sort_key = \"middle_name\"").expect("write");

        let err = Config::from_file(file.path()).expect_err("unknown sort key");
        assert!(matches!(err, ContactsError::Config(_)));
    }

    #[test]
    fn from_map_takes_paths_verbatim() {
        let map: BTreeMap<String, String> = [
            ("data_dir", "/srv/contacts"),
            ("trace_level", "debug"),
            ("sort_key", "nonsense"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_map(&map);
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/contacts")));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.sort_key, SortKey::FirstName);
    }

    #[test]
    fn initialize_applies_sort_key_and_timings() {
        let config = Config {
            sort_key: SortKey::LastName,
            short_notification_ms: 10,
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.sort_key, SortKey::LastName);
        assert_eq!(state.timings.short, Duration::from_millis(10));
    }
}
