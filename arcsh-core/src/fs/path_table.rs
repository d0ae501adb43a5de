//! In-memory table of archive members.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use super::path::{dir_form, normalize_member};

/// One archive member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathEntry {
    /// Explicit directory member (name ends with `/`).
    Directory,
    /// Regular file with its decompressed content.
    File(Vec<u8>),
}

impl PathEntry {
    pub fn is_dir(&self) -> bool {
        matches!(self, PathEntry::Directory)
    }
}

/// Normalized member paths mapped to their entries.
///
/// Directories have no independent existence beyond explicit directory
/// members: a directory is any prefix under which at least one key lives.
/// Keys are case-sensitive and never start with `/`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathTable {
    entries: BTreeMap<String, PathEntry>,
}

impl PathTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry under its normalized name.
    pub fn insert(&mut self, name: &str, entry: PathEntry) {
        self.entries.insert(normalize_member(name), entry);
    }

    /// Add a file (convenience method).
    pub fn add_file(&mut self, name: &str, data: impl Into<Vec<u8>>) {
        self.insert(name, PathEntry::File(data.into()));
    }

    /// Add an explicit directory member. A trailing `/` is appended if missing.
    pub fn add_dir(&mut self, name: &str) {
        let key = dir_form(&normalize_member(name));
        if !key.is_empty() {
            self.entries.insert(key, PathEntry::Directory);
        }
    }

    pub fn get(&self, path: &str) -> Option<&PathEntry> {
        self.entries.get(path)
    }

    /// Check if `path` is itself a key.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Check if any key starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.keys_under(prefix).next().is_some()
    }

    /// Check if any key other than `prefix` itself starts with `prefix`.
    pub fn has_descendants(&self, prefix: &str) -> bool {
        self.keys_under(prefix).any(|key| key != prefix)
    }

    /// Immediate children of the directory `dir`, sorted and deduplicated.
    ///
    /// Children are inferred from deeper keys, so `docs/a.txt` alone makes
    /// `docs` a child of root.
    pub fn children_of(&self, dir: &str) -> Vec<String> {
        let prefix = dir_form(dir);
        let children: BTreeSet<&str> = self
            .keys_under(&prefix)
            .filter_map(|key| key[prefix.len()..].split('/').next())
            .filter(|name| !name.is_empty())
            .collect();
        children.into_iter().map(str::to_string).collect()
    }

    /// Remove every key starting with `prefix`. Returns how many were removed.
    pub fn remove_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        before - self.entries.len()
    }

    /// All keys in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn keys_under<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(|(key, _)| key.as_str())
            .take_while(move |key| key.starts_with(prefix))
    }
}
