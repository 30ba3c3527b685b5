//! Ordered map type for form mappings.
//!
//! This module provides [`FormMap`], a wrapper around [`IndexMap`] that keeps
//! insertion order. Iteration order over mappings is contractually
//! unspecified in the wire format, but an insertion-ordered map makes output
//! deterministic and therefore testable.
//!
//! ## Examples
//!
//! ```rust
//! use urlform::{FormMap, Value};
//!
//! let mut map = FormMap::new();
//! map.insert("device".to_string(), Value::from("pixel"));
//! map.insert("ip".to_string(), Value::from("10.0.0.1"));
//!
//! assert_eq!(Value::Map(map).encode(), "device=pixel&ip=10.0.0.1");
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of string keys to form values.
///
/// # Examples
///
/// ```rust
/// use urlform::{FormMap, Value};
///
/// let mut map = FormMap::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormMap(IndexMap<String, crate::Value>);

impl FormMap {
    /// Creates an empty `FormMap`.
    #[must_use]
    pub fn new() -> Self {
        FormMap(IndexMap::new())
    }

    /// Creates an empty `FormMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FormMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned.
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for FormMap {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        FormMap(map.into_iter().collect())
    }
}

impl From<FormMap> for HashMap<String, crate::Value> {
    fn from(map: FormMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for FormMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, crate::Value)> for FormMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        FormMap(IndexMap::from_iter(iter))
    }
}
