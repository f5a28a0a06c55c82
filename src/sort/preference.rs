//! Best-effort persistence of the sort preference
//!
//! Key and direction are stored separately, as the selectors write them.
//! Each falls back to its default on its own when missing, unreadable or
//! holding an unknown value. Failures are logged and swallowed.

use super::{SortDirection, SortKey, SortPreference};
use crate::storage::KeyValueStore;
use std::str::FromStr;
use tracing::{debug, warn};

/// Durable-store key holding the sort key
pub const SORT_KEY_KEY: &str = "sortKey";

/// Durable-store key holding the sort direction
pub const SORT_DIR_KEY: &str = "sortDir";

fn load_field<T: FromStr + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match store.get(key) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
            debug!(key, value = %raw, "ignoring unknown stored value");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key, error = %e, "could not read stored preference");
            T::default()
        }
    }
}

/// Restore the stored preference, defaulting per field
#[must_use]
pub fn load_preference(store: &dyn KeyValueStore) -> SortPreference {
    SortPreference {
        key: load_field::<SortKey>(store, SORT_KEY_KEY),
        direction: load_field::<SortDirection>(store, SORT_DIR_KEY),
    }
}

/// Store the preference, ignoring failures
pub fn persist_preference(store: &dyn KeyValueStore, pref: SortPreference) {
    let fields = [
        (SORT_KEY_KEY, pref.key.as_str()),
        (SORT_DIR_KEY, pref.direction.as_str()),
    ];
    for (key, value) in fields {
        if let Err(e) = store.set(key, value) {
            warn!(key, error = %e, "could not store preference");
        }
    }
}
