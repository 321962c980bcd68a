//! Named build entries keyed by page name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Mapping from entry name to the source directory that entry builds from.
///
/// Names come from directory base names, so keys are unique by construction.
/// Entries are kept in name order; two maps over the same pages compare
/// equal regardless of the order they were built in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntryMap {
    entries: BTreeMap<String, PathBuf>,
}

impl EntryMap {
    /// Create an empty entry map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the previous path if the name was taken.
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Option<PathBuf> {
        self.entries.insert(name.into(), path.into())
    }

    /// Look up an entry path by name.
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    /// Whether an entry with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entry names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over (name, path) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, PathBuf)> for EntryMap {
    fn from_iter<I: IntoIterator<Item = (String, PathBuf)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inserts_and_looks_up_entries() {
        let mut map = EntryMap::new();
        map.insert("home", "/project/src/pages/home");

        assert_eq!(map.get("home"), Some(Path::new("/project/src/pages/home")));
        assert!(map.contains("home"));
        assert_eq!(map.get("about"), None);
    }

    #[test]
    fn names_come_out_sorted() {
        let mut map = EntryMap::new();
        map.insert("checkout", "/p/checkout");
        map.insert("about", "/p/about");
        map.insert("home", "/p/home");

        let names: Vec<_> = map.names().collect();
        assert_eq!(names, vec!["about", "checkout", "home"]);
    }

    #[test]
    fn duplicate_name_replaces_path() {
        let mut map = EntryMap::new();
        map.insert("home", "/old");
        let previous = map.insert("home", "/new");

        assert_eq!(previous, Some(PathBuf::from("/old")));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("home"), Some(Path::new("/new")));
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut map = EntryMap::new();
        map.insert("home", "/p/home");
        map.insert("about", "/p/about");

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"about":"/p/about","home":"/p/home"}"#);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let mut first = EntryMap::new();
        first.insert("a", "/p/a");
        first.insert("b", "/p/b");

        let mut second = EntryMap::new();
        second.insert("b", "/p/b");
        second.insert("a", "/p/a");

        assert_eq!(first, second);
    }
}
