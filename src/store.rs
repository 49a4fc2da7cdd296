//! Backing record store boundary.
//!
//! The record store tracks which skin names are installed and whether a skin
//! is referenced by any dependent configuration (a section pointing at it,
//! for example). This crate only consumes that information; the actual store
//! lives with the embedder. [`MemorySkinStore`] is provided for tests and for
//! embedders that keep their records in memory.

use crate::error::Result;
use std::collections::BTreeSet;

/// Point queries against the backing record store.
///
/// Store failures surface as [`crate::SkinError::Store`] carrying the store's
/// own message; this crate does not wrap or retry them.
pub trait SkinStore {
    /// Whether a record exists for this exact normalized skin name.
    fn is_installed(&self, skin: &str) -> Result<bool>;

    /// Whether the skin is referenced by any dependent configuration.
    fn is_in_use(&self, skin: &str) -> Result<bool>;
}

/// A preloaded snapshot of known-installed skin names.
///
/// Stores may supply this for batch efficiency: a handle consults the
/// snapshot before issuing a point query. The snapshot is explicit state
/// supplied at construction or refresh time, never a hidden process-wide
/// cache, and a name missing from it still falls through to the store.
#[derive(Debug, Clone, Default)]
pub struct InstalledSnapshot {
    names: BTreeSet<String>,
}

impl InstalledSnapshot {
    /// Build a snapshot from an iterator of normalized skin names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the snapshot lists this skin as installed.
    pub fn contains(&self, skin: &str) -> bool {
        self.names.contains(skin)
    }

    /// Number of names in the snapshot.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// In-memory skin store.
#[derive(Debug, Clone, Default)]
pub struct MemorySkinStore {
    installed: BTreeSet<String>,
    in_use: BTreeSet<String>,
}

impl MemorySkinStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skin as installed.
    pub fn install<S: Into<String>>(&mut self, skin: S) {
        self.installed.insert(skin.into());
    }

    /// Remove a skin's installation record.
    pub fn uninstall(&mut self, skin: &str) {
        self.installed.remove(skin);
        self.in_use.remove(skin);
    }

    /// Record a skin as referenced by dependent configuration.
    pub fn mark_in_use<S: Into<String>>(&mut self, skin: S) {
        self.in_use.insert(skin.into());
    }

    /// Snapshot the currently installed names.
    pub fn snapshot(&self) -> InstalledSnapshot {
        InstalledSnapshot::new(self.installed.iter().cloned())
    }
}

impl SkinStore for MemorySkinStore {
    fn is_installed(&self, skin: &str) -> Result<bool> {
        Ok(self.installed.contains(skin))
    }

    fn is_in_use(&self, skin: &str) -> Result<bool> {
        Ok(self.in_use.contains(skin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_tracks_installation() {
        let mut store = MemorySkinStore::new();
        assert!(!store.is_installed("sample").unwrap());

        store.install("sample");
        assert!(store.is_installed("sample").unwrap());

        store.uninstall("sample");
        assert!(!store.is_installed("sample").unwrap());
    }

    #[test]
    fn memory_store_tracks_usage() {
        let mut store = MemorySkinStore::new();
        store.install("sample");
        assert!(!store.is_in_use("sample").unwrap());

        store.mark_in_use("sample");
        assert!(store.is_in_use("sample").unwrap());

        store.uninstall("sample");
        assert!(!store.is_in_use("sample").unwrap());
    }

    #[test]
    fn snapshot_reflects_installed_names() {
        let mut store = MemorySkinStore::new();
        store.install("alpha");
        store.install("beta");

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains("alpha"));
        assert!(snapshot.contains("beta"));
        assert!(!snapshot.contains("gamma"));
    }

    #[test]
    fn snapshot_from_iterator() {
        let snapshot = InstalledSnapshot::new(["one", "two"]);
        assert!(snapshot.contains("one"));
        assert!(!snapshot.is_empty());

        let empty = InstalledSnapshot::default();
        assert!(empty.is_empty());
        assert!(!empty.contains("one"));
    }

    #[test]
    fn queries_match_exact_names_only() {
        let mut store = MemorySkinStore::new();
        store.install("sample");
        assert!(!store.is_installed("Sample").unwrap());
        assert!(!store.is_installed("sample2").unwrap());
    }
}
