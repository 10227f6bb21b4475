//! Ordered, keyed record collections.

use std::collections::HashMap;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Extracts the lookup key of a record.
pub trait RecordKey<T> {
    /// Returns the key for `record`.
    fn key_of(&self, record: &T) -> String;
}

/// Records indexed by one of their own fields.
///
/// Iteration follows the order in which each key first appeared. When two
/// records share a key the later one replaces the earlier one in place
/// (last write wins).
#[derive(Debug, Clone, PartialEq)]
pub struct Keyed<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Keyed<T> {
    /// Build a keyed collection from records, using `key` to index them.
    pub fn build<K: RecordKey<T>>(records: impl IntoIterator<Item = T>, key: &K) -> Self {
        let mut keyed = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };
        for record in records {
            keyed.insert(key.key_of(&record), record);
        }
        keyed
    }

    fn insert(&mut self, key: String, record: T) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = record,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, record));
            }
        }
    }

    /// Look up a record by key.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Returns true if a record with this key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, record)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Consume the collection, returning the records in order.
    pub fn into_values(self) -> Vec<T> {
        self.entries.into_iter().map(|(_, v)| v).collect()
    }
}

impl<T: Serialize> Serialize for Keyed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Result of a listing operation that can optionally be keyed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Listing<T> {
    /// Records in upstream order.
    List(Vec<T>),
    /// Records indexed by a caller-chosen field.
    Keyed(Keyed<T>),
}

impl<T> Listing<T> {
    /// Wrap records, keying them when a key is given.
    pub fn new<K: RecordKey<T>>(records: Vec<T>, key: Option<K>) -> Self {
        match key {
            Some(key) => Listing::Keyed(Keyed::build(records, &key)),
            None => Listing::List(records),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Listing::List(v) => v.len(),
            Listing::Keyed(k) => k.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the keyed view, if this listing was keyed.
    pub fn as_keyed(&self) -> Option<&Keyed<T>> {
        match self {
            Listing::Keyed(k) => Some(k),
            Listing::List(_) => None,
        }
    }

    /// Consume the listing, returning the records in order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::List(v) => v,
            Listing::Keyed(k) => k.into_values(),
        }
    }
}
