//! Preference persistence.
//!
//! The published site keeps two durable values per visitor: the chosen
//! theme and the privacy-notice acknowledgement. [`PreferenceStore`] is the
//! seam between the state machines ([`crate::theme`], [`crate::privacy`])
//! and wherever those values actually live — origin-scoped browser storage
//! once the site is running, an in-memory map in tests, nothing at all
//! while pre-rendering.
//!
//! Absence is a first-class result: a missing key reads as `None`, never an
//! error, and callers tolerate it on every read. Likewise a store that
//! cannot persist drops writes silently — there is nothing transient to
//! retry and nothing worth surfacing to a visitor.

use std::collections::BTreeMap;

/// Storage key for the resolved theme variant.
pub const THEME_KEY: &str = "theme";

/// Storage key for the privacy-notice acknowledgement.
pub const PRIVACY_KEY: &str = "privacy-notice";

pub trait PreferenceStore {
    /// Read a stored value. Missing keys read as `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, overwriting any previous one.
    fn set(&mut self, key: &str, value: &str);
}

/// Forwarding impl so a machine can borrow a store the caller keeps.
impl<S: PreferenceStore + ?Sized> PreferenceStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

/// Map-backed store with real persistence semantics, no browser required.
///
/// Counts writes so tests can assert that redundant transitions do not
/// touch storage again.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.writes += 1;
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Store for execution contexts with no persistent storage at all, such as
/// the generator pre-rendering pages. Every read is absent and every write
/// is dropped; callers observe "no preference", never a failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl PreferenceStore for UnavailableStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "mocha");
        assert_eq!(store.get(THEME_KEY), Some("mocha".to_string()));
    }

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get(THEME_KEY), None);
        assert_eq!(store.get(PRIVACY_KEY), None);
    }

    #[test]
    fn set_overwrites() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "latte");
        store.set(THEME_KEY, "mocha");
        assert_eq!(store.get(THEME_KEY), Some("mocha".to_string()));
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn unavailable_store_reads_absent_after_write() {
        let mut store = UnavailableStore;
        store.set(THEME_KEY, "mocha");
        assert_eq!(store.get(THEME_KEY), None);
    }

    #[test]
    fn borrowed_store_forwards() {
        let mut store = MemoryStore::new();
        {
            let mut borrowed: &mut MemoryStore = &mut store;
            borrowed.set("k", "v");
        }
        assert_eq!(store.get("k"), Some("v".to_string()));
    }
}
