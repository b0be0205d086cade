//! Debug dump of navigation state.
//!
//! Every change of the effective stack is recorded as a `debug` event carrying
//! the whole registry snapshot as JSON, so a trace file shows each tab's history
//! next to the intent that changed it.

use crate::navigation::NavigationSnapshot;
use serde::Serialize;

/// Emits `snapshot` as a `debug` event.
pub fn record<K: Serialize>(snapshot: &NavigationSnapshot<K>) {
    match serde_json::to_string(snapshot) {
        Ok(json) => tracing::debug!(target: "contactbook::navigation", snapshot = %json, "navigation changed"),
        Err(e) => tracing::debug!(target: "contactbook::navigation", error = %e, "navigation snapshot not serializable"),
    }
}
