//! Insertion-ordered persistent map with structural sharing.
//!
//! [`OrderedMap`] pairs an `im::Vector` of keys (iteration order) with an
//! `im::HashMap` (lookup). Cloning is O(1) and clones never observe each
//! other's writes, which is what lets collections copy-on-write cheaply.

use std::fmt;
use std::iter::FromIterator;

use crate::error::{Error, Result};
use crate::key::Key;

/// Persistent map that remembers insertion order.
///
/// Overwriting an existing key keeps its position; new keys are appended.
/// The map also tracks the next free integer key: one past the greatest
/// non-negative integer key ever stored through this map or the map it was
/// cloned from.
#[derive(Clone)]
pub struct OrderedMap<V>
where
    V: Clone,
{
    order: im::Vector<Key>,
    values: im::HashMap<Key, V>,
    next_int: i64,
}

impl<V: Clone> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> OrderedMap<V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: im::Vector::new(),
            values: im::HashMap::new(),
            next_int: 0,
        }
    }

    /// Creates a map holding `values` under integer keys counting from zero.
    #[must_use]
    pub fn sequential(values: impl IntoIterator<Item = V>) -> Self {
        (0_i64..)
            .zip(values)
            .map(|(n, value)| (Key::Int(n), value))
            .collect()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Gets a value by key.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&V> {
        self.values.get(key)
    }

    /// Returns true if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the entry at `index` in iteration order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&Key, &V)> {
        let key = self.order.get(index)?;
        self.values.get(key).map(|value| (key, value))
    }

    /// Returns the iteration position of `key`.
    #[must_use]
    pub fn position(&self, key: &Key) -> Option<usize> {
        if !self.values.contains_key(key) {
            return None;
        }
        self.order.index_of(key)
    }

    /// Returns the key the next [`push`](Self::push) would use.
    #[must_use]
    pub fn next_int_key(&self) -> i64 {
        self.next_int
    }

    /// Returns the first entry.
    #[must_use]
    pub fn first(&self) -> Option<(&Key, &V)> {
        self.get_index(0)
    }

    /// Returns the last entry.
    #[must_use]
    pub fn last(&self) -> Option<(&Key, &V)> {
        self.get_index(self.len().checked_sub(1)?)
    }

    /// Returns a new map with the key set to `value`.
    #[must_use]
    pub fn insert(&self, key: Key, value: V) -> Self {
        let mut new = self.clone();
        new.set(key, value);
        new
    }

    /// Returns a new map with `value` appended under the next integer key.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    pub fn push(&self, value: V) -> Result<Self> {
        let mut new = self.clone();
        new.append(value)?;
        Ok(new)
    }

    /// Returns a new map with the key removed.
    ///
    /// Removing an absent key returns an equal map.
    #[must_use]
    pub fn remove(&self, key: &Key) -> Self {
        let mut new = self.clone();
        new.delete(key);
        new
    }

    /// Sets `key` to `value` on this handle only.
    ///
    /// Other clones of the map are unaffected.
    pub fn set(&mut self, key: Key, value: V) {
        if let Key::Int(n) = key {
            if n >= self.next_int {
                self.next_int = n.saturating_add(1);
            }
        }
        if self.values.insert(key.clone(), value).is_none() {
            self.order.push_back(key);
        }
    }

    /// Appends `value` under the next integer key on this handle only.
    ///
    /// Returns the key that was used.
    ///
    /// # Errors
    ///
    /// Fails without touching the map if the next integer key is already
    /// taken, which happens once `i64::MAX` has been used.
    pub fn append(&mut self, value: V) -> Result<Key> {
        let key = Key::Int(self.next_int);
        if self.values.contains_key(&key) {
            return Err(Error::next_key_occupied(key));
        }
        self.set(key.clone(), value);
        Ok(key)
    }

    /// Removes `key` on this handle only, returning its value.
    pub fn delete(&mut self, key: &Key) -> Option<V> {
        let value = self.values.remove(key)?;
        if let Some(index) = self.order.index_of(key) {
            self.order.remove(index);
        }
        Some(value)
    }

    /// Returns an iterator over entries in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Key, &V)> {
        self.order
            .iter()
            .filter_map(move |key| self.values.get(key).map(|value| (key, value)))
    }

    /// Returns an iterator over keys in insertion order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Key> {
        self.order.iter()
    }

    /// Returns an iterator over values in insertion order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<V: Clone + fmt::Debug> fmt::Debug for OrderedMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two maps are equal when they hold equal entries in the same order.
impl<V: Clone + PartialEq> PartialEq for OrderedMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Clone + Eq> Eq for OrderedMap<V> {}

impl<V: Clone> FromIterator<(Key, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (Key, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<V: Clone> Extend<(Key, V)> for OrderedMap<V> {
    fn extend<I: IntoIterator<Item = (Key, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, V: Clone> IntoIterator for &'a OrderedMap<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = Box<dyn DoubleEndedIterator<Item = (&'a Key, &'a V)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
