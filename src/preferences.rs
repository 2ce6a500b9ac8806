//! In-memory preference store
//!
//! Process-wide mapping from user identifier to the ordered list of
//! ingredients that user has stated a liking for. Entries are created lazily
//! on first append and live for the process lifetime; sequences only grow.

use dashmap::DashMap;

/// Concurrent map of `user_id -> ordered ingredient list`.
///
/// `DashMap` shards serialize appends for the same key, so two requests
/// racing on one user cannot corrupt the sequence. Reads clone the list out
/// of the map so no shard lock is held by callers.
#[derive(Debug, Default)]
pub struct PreferenceStore {
    inner: DashMap<String, Vec<String>>,
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    /// Append an ingredient to a user's list, creating the list if absent.
    /// Duplicates are stored as-is; there is no dedup.
    pub fn append(&self, user_id: &str, ingredient: &str) {
        self.inner
            .entry(user_id.to_string())
            .or_default()
            .push(ingredient.to_string());
    }

    /// The user's ingredients in insertion order; empty for unknown users.
    pub fn get(&self, user_id: &str) -> Vec<String> {
        self.inner
            .get(user_id)
            .map(|prefs| prefs.clone())
            .unwrap_or_default()
    }
}
