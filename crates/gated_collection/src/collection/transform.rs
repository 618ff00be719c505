//! Reordering, re-keying and mapping operations.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use gated_foundation::{Error, Key, OrderedMap, Result, Value};

use super::{CALLBACK, Collection, callback_argument};
use crate::callback::{self, CallbackOutput};
use crate::policy::AcceptancePolicy;

impl<P: AcceptancePolicy> Collection<P> {
    /// Returns an empty collection of the same kind.
    #[must_use]
    pub fn to_cleared(&self) -> Self {
        Self::trusted(OrderedMap::new())
    }

    /// Returns the entries in reverse order.
    ///
    /// With `preserve_keys` false, integer keys are renumbered from zero in
    /// the new order while string keys are kept.
    #[must_use]
    pub fn to_reversed(&self, preserve_keys: bool) -> Self {
        let mut entries = OrderedMap::new();
        let mut next = 0_i64;
        for (key, value) in self.entries.iter().rev() {
            if preserve_keys || !key.is_int() {
                entries.set(key.clone(), value.clone());
            } else {
                entries.set(Key::Int(next), value.clone());
                next += 1;
            }
        }
        Self::trusted(entries)
    }

    /// Returns the values re-keyed from zero, in order.
    #[must_use]
    pub fn to_sequential(&self) -> Self {
        Self::trusted(OrderedMap::sequential(self.entries.values().cloned()))
    }

    /// Returns the entries stably sorted by `comparator(a, b)`.
    ///
    /// The comparator returns a negative, zero or positive int. Keys stay
    /// attached to their values. After the first failing call the remaining
    /// comparisons are skipped and the failure is returned.
    ///
    /// # Errors
    ///
    /// Fails if the comparator returns an error or anything but an int.
    pub fn to_sorted_by<R, F>(&self, mut comparator: F) -> Result<Self>
    where
        R: CallbackOutput,
        F: FnMut(&Value, &Value) -> R,
    {
        let mut sorted: Vec<(&Key, &Value)> = self.entries.iter().collect();
        let mut failed: Option<Error> = None;
        sorted.sort_by(|&(key, a), &(_, b)| {
            if failed.is_some() {
                return Ordering::Equal;
            }
            let ranking = callback::output(comparator(a, b), key, a)
                .and_then(|returned| callback::expect_int(&returned, "to_sorted_by", key));
            match ranking {
                Ok(n) => n.cmp(&0),
                Err(e) => {
                    failed = Some(e);
                    Ordering::Equal
                }
            }
        });
        if let Some(e) = failed {
            return Err(self.fail("to_sorted_by", callback_argument(), e));
        }
        Ok(Self::trusted(
            sorted
                .into_iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ))
    }

    /// Drops entries whose fingerprint was already seen.
    ///
    /// `callback(value, key)` returns the fingerprint string. With
    /// `use_first` the earliest entry per fingerprint is kept, otherwise the
    /// latest. Kept entries retain their keys and relative order.
    ///
    /// # Errors
    ///
    /// Fails if the callback returns an error or anything but a string.
    pub fn to_unique_by<R, F>(&self, mut callback: F, use_first: bool) -> Result<Self>
    where
        R: CallbackOutput,
        F: FnMut(&Value, &Key) -> R,
    {
        let mut fingerprint = || {
            let mut prints: Vec<Arc<str>> = Vec::with_capacity(self.count());
            for (key, value) in self.entries.iter() {
                let returned = callback::output(callback(value, key), key, value)?;
                prints.push(callback::expect_string(returned, "to_unique_by", key)?);
            }
            Ok::<_, Error>(prints)
        };
        let prints = fingerprint().map_err(|e| {
            self.fail(
                "to_unique_by",
                vec![CALLBACK.to_string(), use_first.to_string()],
                e,
            )
        })?;

        let keep: Vec<bool> = if use_first {
            let mut seen = HashSet::new();
            prints.iter().map(|p| seen.insert(p.clone())).collect()
        } else {
            let last: HashMap<&Arc<str>, usize> =
                prints.iter().enumerate().map(|(i, p)| (p, i)).collect();
            prints
                .iter()
                .enumerate()
                .map(|(i, p)| last.get(p) == Some(&i))
                .collect()
        };

        Ok(Self::trusted(
            self.entries
                .iter()
                .zip(keep)
                .filter(|(_, kept)| *kept)
                .map(|((key, value), _)| (key.clone(), value.clone()))
                .collect(),
        ))
    }

    /// Maps every value through `callback(value, key)` into a collection
    /// gated by `Q`, keeping keys.
    ///
    /// # Errors
    ///
    /// Fails if the callback returns an error, or if `Q` rejects any mapped
    /// value (reported together, like construction).
    pub fn map_to<Q, R, F>(&self, mut callback: F) -> Result<Collection<Q>>
    where
        Q: AcceptancePolicy,
        R: CallbackOutput,
        F: FnMut(&Value, &Key) -> R,
    {
        let mut map = || {
            let mut mapped = OrderedMap::new();
            for (key, value) in self.entries.iter() {
                mapped.set(key.clone(), callback::output(callback(value, key), key, value)?);
            }
            Collection::<Q>::build(mapped)
        };
        map().map_err(|e| {
            self.fail(
                "map_to",
                vec![Collection::<Q>::type_label(), CALLBACK.to_string()],
                e,
            )
        })
    }
}
