//! Explicit traversal over a collection.

use gated_foundation::{Key, OrderedMap, Value};

/// A movable position over a collection's entries.
///
/// The cursor borrows the collection, so moving it never changes what the
/// collection holds. Each cursor is independent; two cursors over the same
/// collection do not affect each other.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    map: &'a OrderedMap<Value>,
    position: Option<usize>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(map: &'a OrderedMap<Value>) -> Self {
        Self {
            map,
            position: Some(0),
        }
    }

    /// Moves to the first entry and returns its value.
    pub fn first(&mut self) -> Option<&'a Value> {
        self.position = Some(0);
        self.current()
    }

    /// Moves to the last entry and returns its value.
    pub fn last(&mut self) -> Option<&'a Value> {
        self.position = self.map.len().checked_sub(1);
        self.current()
    }

    /// Returns the value at the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&'a Value> {
        self.entry().map(|(_, value)| value)
    }

    /// Returns the key at the cursor.
    #[must_use]
    pub fn key(&self) -> Option<&'a Key> {
        self.entry().map(|(key, _)| key)
    }

    /// Advances and returns the value at the new position.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a Value> {
        let len = self.map.len();
        self.position = Some(self.position.map_or(0, |p| (p + 1).min(len)));
        self.current()
    }

    /// Steps back and returns the value at the new position.
    ///
    /// Stepping back from the first entry leaves the cursor before the
    /// start, where `current` is `None`.
    pub fn prev(&mut self) -> Option<&'a Value> {
        self.position = self.position.and_then(|p| p.checked_sub(1));
        self.current()
    }

    /// Moves back to the first entry.
    pub fn reset(&mut self) {
        self.position = Some(0);
    }

    fn entry(&self) -> Option<(&'a Key, &'a Value)> {
        self.position.and_then(|p| self.map.get_index(p))
    }
}
