//! Resolved key → display string mapping.

use std::collections::HashMap;
use std::collections::hash_map;

use crate::RecordKey;

/// Output of a resolver: one or more keys mapped to their display text.
///
/// Merging is last-writer-wins: [`put`](Self::put) overwrites and
/// [`put_all`](Self::put_all) replaces colliding keys with the incoming values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultMap {
    values: HashMap<RecordKey, String>,
}

impl ResultMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map holding a single entry.
    #[must_use]
    pub fn single(key: RecordKey, value: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.put(key, value);
        map
    }

    /// Insert or overwrite a value, returning the previous one.
    pub fn put(&mut self, key: RecordKey, value: impl Into<String>) -> Option<String> {
        self.values.insert(key, value.into())
    }

    /// Merge another map into this one; incoming values win on collision.
    pub fn put_all(&mut self, other: Self) {
        self.values.extend(other.values);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecordKey, &str)> {
        self.values.iter().map(|(k, v)| (k, v.as_str()))
    }
}

impl IntoIterator for ResultMap {
    type Item = (RecordKey, String);
    type IntoIter = hash_map::IntoIter<RecordKey, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl FromIterator<(RecordKey, String)> for ResultMap {
    fn from_iter<T: IntoIterator<Item = (RecordKey, String)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
