//! Copy-on-write `with_*` operations.
//!
//! Each operation clones the backing map (an O(1) structural share), applies
//! its change to the clone and returns the result as a new collection. The
//! receiver is never touched.

use gated_foundation::{Error, IntoKey, Key, OrderedMap, Result, Value, render};

use super::{CALLBACK, Collection};
use crate::callback::{self, CallbackOutput};
use crate::policy::AcceptancePolicy;

impl<P: AcceptancePolicy> Collection<P> {
    /// Appends `value` at the next integer key.
    ///
    /// # Errors
    ///
    /// Fails with an unacceptable element if the policy rejects `value`, or
    /// if the next integer key is already taken.
    pub fn with_added(&self, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        let add = || {
            P::assert_accepted(&value)?;
            let mut entries = self.entries.clone();
            entries.append(value.clone())?;
            Ok::<_, Error>(entries)
        };
        add()
            .map(Self::trusted)
            .map_err(|e| self.fail("with_added", vec![render::value(&value)], e))
    }

    /// Appends every value of `values` at successive integer keys.
    ///
    /// The whole batch is validated before anything is appended.
    ///
    /// # Errors
    ///
    /// Fails with the count and a sample of rejected values if the policy
    /// rejects any of them, or if the integer keys run out part way.
    pub fn with_added_multiple<V: Into<Value>>(
        &self,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        let batch: OrderedMap<Value> = OrderedMap::sequential(values.into_iter().map(Into::into));
        let add = || {
            Self::check_all(batch.iter(), batch.len())?;
            let mut entries = self.entries.clone();
            for value in batch.values() {
                entries.append(value.clone())?;
            }
            Ok::<_, Error>(entries)
        };
        add().map(Self::trusted).map_err(|e| {
            self.fail(
                "with_added_multiple",
                vec![format!("{} values", batch.len())],
                e,
            )
        })
    }

    /// Keeps the entries for which `predicate(value, key)` is truthy.
    ///
    /// # Errors
    ///
    /// Fails if the predicate returns an error.
    pub fn with_filtered<R, F>(&self, mut predicate: F) -> Result<Self>
    where
        R: CallbackOutput,
        F: FnMut(&Value, &Key) -> R,
    {
        let mut filter = || {
            let mut kept = OrderedMap::new();
            for (key, value) in self.entries.iter() {
                if callback::output(predicate(value, key), key, value)?.is_truthy() {
                    kept.set(key.clone(), value.clone());
                }
            }
            Ok::<_, Error>(kept)
        };
        filter()
            .map(Self::trusted)
            .map_err(|e| self.fail("with_filtered", vec![CALLBACK.to_string()], e))
    }

    /// Merges `other` into a copy of this collection.
    ///
    /// Integer keys of `other` are appended after this collection's integer
    /// sequence; string keys overwrite in place.
    ///
    /// # Errors
    ///
    /// Fails with an unacceptable collection if `other`'s policy is not
    /// compatible with this one, or if any of its values is rejected. In the
    /// latter case the rejected element is the cause. Also fails if the
    /// integer keys run out while appending.
    pub fn with_merged<Q: AcceptancePolicy>(&self, other: &Collection<Q>) -> Result<Self> {
        self.merge(other)
            .map_err(|e| self.fail("with_merged", vec![other.summary()], e))
    }

    fn merge<Q: AcceptancePolicy>(&self, other: &Collection<Q>) -> Result<Self> {
        let incompatible = || Error::unacceptable_collection(Self::type_label(), other.summary());
        if !P::descriptor().admits(Q::descriptor()) {
            return Err(incompatible());
        }
        let mut entries = self.entries.clone();
        for (key, value) in other.iter() {
            P::assert_accepted(value).map_err(|e| incompatible().caused_by(e))?;
            match key {
                Key::Int(_) => {
                    entries.append(value.clone())?;
                }
                Key::Str(_) => entries.set(key.clone(), value.clone()),
            }
        }
        Ok(Self::trusted(entries))
    }

    /// Removes the entry under `key`. An absent key is not an error.
    ///
    /// # Errors
    ///
    /// Fails with an invalid argument if `key` is neither int nor string.
    pub fn with_removed(&self, key: impl IntoKey) -> Result<Self> {
        let key = key
            .into_key()
            .map_err(|e| self.fail("with_removed", Vec::new(), e))?;
        let mut entries = self.entries.clone();
        entries.delete(&key);
        Ok(Self::trusted(entries))
    }

    /// Removes the first occurrence of `value`, if any.
    ///
    /// # Errors
    ///
    /// Fails with an unacceptable element if the policy rejects `value`.
    pub fn with_removed_element(&self, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        P::assert_accepted(&value)
            .map_err(|e| self.fail("with_removed_element", vec![render::value(&value)], e))?;
        let mut entries = self.entries.clone();
        if let Some((key, _)) = self.position_of(&value) {
            entries.delete(key);
        }
        Ok(Self::trusted(entries))
    }

    /// Sets `value` under `key`, keeping the position of an existing key.
    ///
    /// # Errors
    ///
    /// Fails if `key` is neither int nor string, if the policy rejects
    /// `value`, or both; both violations are reported together.
    pub fn with_set(&self, key: impl IntoKey, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        let key = key.into_key();
        let accepted = P::assert_accepted(&value);
        let key = match (key, accepted) {
            (Ok(key), Ok(())) => key,
            (key, accepted) => {
                let kinds = key.err().into_iter().chain(accepted.err()).map(|e| e.kind);
                let error = Error::violations(kinds.collect());
                return Err(self.fail("with_set", vec![render::value(&value)], error));
            }
        };
        let mut entries = self.entries.clone();
        entries.set(key, value);
        Ok(Self::trusted(entries))
    }

    /// Returns the run of entries starting at `offset`, keeping their keys.
    ///
    /// A negative `offset` counts from the end. `length` limits the run; a
    /// negative `length` stops that many entries before the end; `None`
    /// takes everything to the end.
    #[must_use]
    pub fn with_sliced(&self, offset: i64, length: Option<i64>) -> Self {
        let count = i64::try_from(self.count()).unwrap_or(i64::MAX);
        let start = if offset < 0 {
            count.saturating_add(offset).max(0)
        } else {
            offset.min(count)
        };
        let end = match length {
            None => count,
            Some(length) if length < 0 => count.saturating_add(length).max(start),
            Some(length) => start.saturating_add(length).min(count),
        };
        let start = usize::try_from(start).unwrap_or(0);
        let take = usize::try_from(end).unwrap_or(0).saturating_sub(start);
        Self::trusted(
            self.entries
                .iter()
                .skip(start)
                .take(take)
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }
}
