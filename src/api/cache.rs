// SPDX-License-Identifier: MPL-2.0
//! Invalidate-by-key query cache.
//!
//! Mutations do not update cached collections in place; they call
//! [`QueryCache::invalidate`] so the owner refetches on the next read. This
//! mirrors the client-side cache the gallery API consumers rely on: storing a
//! result makes the entry fresh, invalidating marks it stale without
//! discarding the (still displayable) value.

use std::collections::HashMap;

/// Freshness of a cached entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Fresh,
    Stale,
    Absent,
}

#[derive(Debug)]
struct Entry<T> {
    value: T,
    stale: bool,
}

/// Keyed cache of query results.
#[derive(Debug)]
pub struct QueryCache<T> {
    entries: HashMap<String, Entry<T>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> QueryCache<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a query result, replacing any previous entry and clearing
    /// staleness.
    pub fn store(&mut self, key: impl Into<String>, value: T) {
        self.entries.insert(
            key.into(),
            Entry {
                value,
                stale: false,
            },
        );
    }

    /// Returns the cached value, stale or not. Callers that care about
    /// freshness check [`QueryCache::state`] first.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    #[must_use]
    pub fn state(&self, key: &str) -> QueryState {
        match self.entries.get(key) {
            Some(entry) if entry.stale => QueryState::Stale,
            Some(_) => QueryState::Fresh,
            None => QueryState::Absent,
        }
    }

    #[must_use]
    pub fn is_stale(&self, key: &str) -> bool {
        self.state(key) == QueryState::Stale
    }

    /// Marks the entry stale so the next reader refetches.
    ///
    /// Returns `true` if an entry existed. Invalidating an absent key is a
    /// no-op.
    pub fn invalidate(&mut self, key: &str) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.stale = true;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<T> {
        self.entries.remove(key).map(|entry| entry.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cache_has_no_entries() {
        let cache: QueryCache<Vec<u32>> = QueryCache::new();
        assert_eq!(cache.state("images"), QueryState::Absent);
        assert!(cache.get("images").is_none());
    }

    #[test]
    fn store_makes_entry_fresh() {
        let mut cache = QueryCache::new();
        cache.store("images", vec![1, 2, 3]);

        assert_eq!(cache.state("images"), QueryState::Fresh);
        assert_eq!(cache.get("images"), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn invalidate_marks_stale_but_keeps_value() {
        let mut cache = QueryCache::new();
        cache.store("images", vec![1]);

        assert!(cache.invalidate("images"));
        assert_eq!(cache.state("images"), QueryState::Stale);
        assert!(cache.is_stale("images"));
        // The stale value is still readable while the refetch is in flight.
        assert_eq!(cache.get("images"), Some(&vec![1]));
    }

    #[test]
    fn invalidate_absent_key_is_a_noop() {
        let mut cache: QueryCache<Vec<u32>> = QueryCache::new();
        assert!(!cache.invalidate("images"));
        assert_eq!(cache.state("images"), QueryState::Absent);
    }

    #[test]
    fn store_after_invalidate_clears_staleness() {
        let mut cache = QueryCache::new();
        cache.store("images", vec![1]);
        cache.invalidate("images");

        cache.store("images", vec![1, 2]);
        assert_eq!(cache.state("images"), QueryState::Fresh);
        assert_eq!(cache.get("images"), Some(&vec![1, 2]));
    }

    #[test]
    fn remove_discards_the_entry() {
        let mut cache = QueryCache::new();
        cache.store("images", vec![7]);

        assert_eq!(cache.remove("images"), Some(vec![7]));
        assert_eq!(cache.state("images"), QueryState::Absent);
        assert_eq!(cache.remove("images"), None);
    }

    #[test]
    fn keys_are_independent() {
        let mut cache = QueryCache::new();
        cache.store("images", vec![1]);
        cache.store("albums", vec![2]);

        cache.invalidate("images");
        assert_eq!(cache.state("images"), QueryState::Stale);
        assert_eq!(cache.state("albums"), QueryState::Fresh);
    }
}
