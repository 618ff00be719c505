//! The gated collection.
//!
//! [`Collection`] wraps an [`OrderedMap`] of values that all satisfy the
//! acceptance policy `P`. It is never modified after construction: every
//! `to_*` and `with_*` operation returns a new collection built on a
//! copy-on-write clone of the backing map.
//!
//! Failures are reported as a chain. The outermost error is always
//! [`ErrorKind::Failure`](gated_foundation::ErrorKind::Failure) naming the
//! operation, its arguments and the receiver; the specific reason sits below
//! it as the error's source.

mod transform;
mod with;

use std::fmt;
use std::marker::PhantomData;

use gated_foundation::{
    DiagnosticsConfig, Error, ErrorContext, IntoKey, Key, OrderedMap, Result, Sample, Value,
    render,
};
use tracing::{debug, trace};

use crate::callback::{self, CallbackOutput};
use crate::cursor::Cursor;
use crate::policy::{AcceptancePolicy, Unrestricted};

const CALLBACK: &str = "<callback>";

/// Immutable ordered mapping of keys to values gated by policy `P`.
pub struct Collection<P: AcceptancePolicy = Unrestricted> {
    entries: OrderedMap<Value>,
    policy: PhantomData<fn() -> P>,
}

// =============================================================================
// Construction
// =============================================================================

impl<P: AcceptancePolicy> Collection<P> {
    /// Creates a collection from key-value pairs, keeping their order.
    ///
    /// A key given twice keeps its first position and its last value.
    ///
    /// # Errors
    ///
    /// Fails if the policy's own precondition is not met (for example a
    /// missing handled type), if a key is neither int nor string, or if any
    /// value is rejected by the policy. Rejected values are reported together
    /// with their count and a bounded sample.
    pub fn new<K, V>(input: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: IntoKey,
        V: Into<Value>,
    {
        let mut entries = OrderedMap::new();
        for (key, value) in input {
            let key = key
                .into_key()
                .map_err(|e| Self::fail_static("new", Vec::new(), e))?;
            entries.set(key, value.into());
        }
        let total = entries.len();
        Self::build(entries)
            .map_err(|e| Self::fail_static("new", vec![format!("{total} entries")], e))
    }

    /// Creates a collection with sequential keys from zero.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn from_values<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Result<Self> {
        let entries: OrderedMap<Value> = OrderedMap::sequential(values.into_iter().map(Into::into));
        let total = entries.len();
        Self::build(entries)
            .map_err(|e| Self::fail_static("from_values", vec![format!("{total} values")], e))
    }

    /// Creates a collection from a prepared map.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn from_map(entries: OrderedMap<Value>) -> Result<Self> {
        let total = entries.len();
        Self::build(entries)
            .map_err(|e| Self::fail_static("from_map", vec![format!("{total} entries")], e))
    }

    /// Creates an empty collection.
    ///
    /// # Errors
    ///
    /// Fails only if the policy's own precondition is not met.
    pub fn empty() -> Result<Self> {
        Self::build(OrderedMap::new()).map_err(|e| Self::fail_static("empty", Vec::new(), e))
    }

    fn build(entries: OrderedMap<Value>) -> Result<Self> {
        P::verify()?;
        Self::check_all(entries.iter(), entries.len())?;
        trace!(collection = %Self::type_label(), len = entries.len(), "constructed collection");
        Ok(Self::trusted(entries))
    }

    /// Wraps entries that are already known to satisfy `P`.
    pub(crate) fn trusted(entries: OrderedMap<Value>) -> Self {
        Self {
            entries,
            policy: PhantomData,
        }
    }

    /// Validates a batch, reporting every rejected entry at once.
    fn check_all<'a>(
        entries: impl IntoIterator<Item = (&'a Key, &'a Value)>,
        total: usize,
    ) -> Result<()> {
        let invalid: Vec<_> = entries
            .into_iter()
            .filter(|(_, value)| !P::is_accepted(value))
            .collect();
        if invalid.is_empty() {
            return Ok(());
        }
        let count = invalid.len();
        Err(Error::unacceptable_elements(
            count,
            total,
            Sample::collect(invalid),
        ))
    }
}

// =============================================================================
// Policy and diagnostics
// =============================================================================

impl<P: AcceptancePolicy> Collection<P> {
    /// Returns true if `value` may be stored in this kind of collection.
    #[must_use]
    pub fn is_accepted(value: &Value) -> bool {
        P::is_accepted(value)
    }

    /// Fails if `value` may not be stored in this kind of collection.
    ///
    /// # Errors
    ///
    /// Returns an unacceptable element error naming the value.
    pub fn assert_accepted(value: &Value) -> Result<()> {
        P::assert_accepted(value)
    }

    /// Returns the type label used in diagnostics, e.g. `Collection<int>`.
    #[must_use]
    pub fn type_label() -> String {
        format!("Collection<{}>", P::describe())
    }

    /// Returns a short summary of this instance for diagnostics.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}[{} elements]", Self::type_label(), self.count())
    }

    pub(crate) fn fail(&self, method: &str, arguments: Vec<String>, cause: Error) -> Error {
        failure(
            ErrorContext {
                receiver: self.summary(),
                method: method.to_string(),
                arguments,
            },
            cause,
        )
    }

    fn fail_static(method: &str, arguments: Vec<String>, cause: Error) -> Error {
        failure(
            ErrorContext {
                receiver: Self::type_label(),
                method: method.to_string(),
                arguments,
            },
            cause,
        )
    }
}

/// Wraps `cause` as the failure of an operation, logging it when enabled.
pub(crate) fn failure(context: ErrorContext, cause: Error) -> Error {
    if DiagnosticsConfig::current().log_failures {
        debug!(
            operation = %context.method,
            receiver = %context.receiver,
            error = %cause.report(),
            "collection operation failed"
        );
    }
    Error::failure(context, cause)
}

fn callback_argument() -> Vec<String> {
    vec![CALLBACK.to_string()]
}

// =============================================================================
// Queries
// =============================================================================

impl<P: AcceptancePolicy> Collection<P> {
    /// Returns the number of entries.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `value` is stored under any key.
    ///
    /// Scalars compare by value, objects by identity.
    ///
    /// # Errors
    ///
    /// Fails with an invalid argument if `value` could never be stored here.
    pub fn contains(&self, value: impl Into<Value>) -> Result<bool> {
        let value = value.into();
        self.validate_argument(&value)
            .map_err(|e| self.fail("contains", vec![render::value(&value)], e))?;
        Ok(self.position_of(&value).is_some())
    }

    /// Gets the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Fails with an invalid argument if `key` is neither int nor string.
    pub fn get(&self, key: impl IntoKey) -> Result<Option<&Value>> {
        let key = key
            .into_key()
            .map_err(|e| self.fail("get", Vec::new(), e))?;
        Ok(self.entries.get(&key))
    }

    /// Returns true if `key` is present.
    ///
    /// # Errors
    ///
    /// Fails with an invalid argument if `key` is neither int nor string.
    pub fn has(&self, key: impl IntoKey) -> Result<bool> {
        let key = key
            .into_key()
            .map_err(|e| self.fail("has", Vec::new(), e))?;
        Ok(self.entries.contains_key(&key))
    }

    /// Gets the value stored under `key`, failing if it is absent.
    ///
    /// # Errors
    ///
    /// Fails with an invalid argument for a malformed key and with key not
    /// found for an absent one.
    pub fn require(&self, key: impl IntoKey) -> Result<&Value> {
        let key = key
            .into_key()
            .map_err(|e| self.fail("require", Vec::new(), e))?;
        self.entries.get(&key).ok_or_else(|| {
            let argument = format!("{key:?}");
            self.fail("require", vec![argument], Error::key_not_found(key))
        })
    }

    /// Returns the key under which `value` first occurs.
    ///
    /// # Errors
    ///
    /// Fails with an invalid argument if `value` could never be stored here.
    pub fn index_of(&self, value: impl Into<Value>) -> Result<Option<&Key>> {
        let value = value.into();
        self.validate_argument(&value)
            .map_err(|e| self.fail("index_of", vec![render::value(&value)], e))?;
        Ok(self.position_of(&value).map(|(key, _)| key))
    }

    /// Returns the key under which `value` first occurs, failing if absent.
    ///
    /// # Errors
    ///
    /// Fails with an invalid argument for an unacceptable value and with
    /// element not found when it is absent.
    pub fn require_index_of(&self, value: impl Into<Value>) -> Result<&Key> {
        let value = value.into();
        let rendered = render::value(&value);
        self.validate_argument(&value)
            .and_then(|()| {
                self.position_of(&value)
                    .map(|(key, _)| key)
                    .ok_or_else(|| Error::element_not_found(&value))
            })
            .map_err(|e| self.fail("require_index_of", vec![rendered], e))
    }

    fn validate_argument(&self, value: &Value) -> Result<()> {
        P::assert_accepted(value).map_err(|e| {
            Error::invalid_argument(format!("value is not accepted by {}", Self::type_label()))
                .caused_by(e)
        })
    }

    pub(crate) fn position_of(&self, value: &Value) -> Option<(&Key, &Value)> {
        self.entries.iter().find(|(_, v)| *v == value)
    }

    /// Returns the first value without touching any cursor.
    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.entries.first().map(|(_, v)| v)
    }

    /// Returns the last value without touching any cursor.
    #[must_use]
    pub fn last(&self) -> Option<&Value> {
        self.entries.last().map(|(_, v)| v)
    }

    /// Returns the first key.
    #[must_use]
    pub fn first_key(&self) -> Option<&Key> {
        self.entries.first().map(|(k, _)| k)
    }

    /// Returns the last key.
    #[must_use]
    pub fn last_key(&self) -> Option<&Key> {
        self.entries.last().map(|(k, _)| k)
    }

    /// Creates a cursor positioned on the first entry.
    #[must_use]
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.entries)
    }

    /// Returns an iterator over entries in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }

    /// Returns an iterator over keys in order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Key> {
        self.entries.keys()
    }

    /// Returns an iterator over values in order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &Value> {
        self.entries.values()
    }

    /// Returns the backing map.
    #[must_use]
    pub fn as_map(&self) -> &OrderedMap<Value> {
        &self.entries
    }

    /// Exports the entries as they are.
    #[must_use]
    pub fn to_array(&self) -> Vec<(Key, Value)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Exports the values, dropping the keys.
    #[must_use]
    pub fn to_array_values(&self) -> Vec<Value> {
        self.entries.values().cloned().collect()
    }

    /// Returns the first value for which `predicate(value, key)` is true.
    ///
    /// # Errors
    ///
    /// Fails if the predicate returns an error or anything but a bool.
    pub fn find<R, F>(&self, mut predicate: F) -> Result<Option<&Value>>
    where
        R: CallbackOutput,
        F: FnMut(&Value, &Key) -> R,
    {
        let mut scan = || {
            for (key, value) in self.entries.iter() {
                let returned = callback::output(predicate(value, key), key, value)?;
                if callback::expect_bool(&returned, "find", key)? {
                    return Ok(Some(value));
                }
            }
            Ok::<_, Error>(None)
        };
        scan().map_err(|e| self.fail("find", callback_argument(), e))
    }

    /// Calls `callback(value, key)` for every entry in order.
    ///
    /// # Errors
    ///
    /// Fails with the first error the callback returns, annotated with the
    /// key and value it was called with.
    pub fn each<R, F>(&self, mut callback: F) -> Result<()>
    where
        R: CallbackOutput,
        F: FnMut(&Value, &Key) -> R,
    {
        self.each_with(&mut (), |value, key, ()| callback(value, key))
    }

    /// Calls `callback(value, key, carry)` for every entry in order.
    ///
    /// # Errors
    ///
    /// See [`each`](Self::each).
    pub fn each_with<C, R, F>(&self, carry: &mut C, mut callback: F) -> Result<()>
    where
        R: CallbackOutput,
        F: FnMut(&Value, &Key, &mut C) -> R,
    {
        let mut run = || {
            for (key, value) in self.entries.iter() {
                callback::output(callback(value, key, carry), key, value)?;
            }
            Ok::<_, Error>(())
        };
        run().map_err(|e| self.fail("each", callback_argument(), e))
    }

    /// Calls `callback(value, key)` in order until it returns `false`.
    ///
    /// Returns true if every entry was visited.
    ///
    /// # Errors
    ///
    /// Fails if the callback returns an error or anything but a bool or nil.
    pub fn every<R, F>(&self, mut callback: F) -> Result<bool>
    where
        R: CallbackOutput,
        F: FnMut(&Value, &Key) -> R,
    {
        self.every_with(&mut (), |value, key, ()| callback(value, key))
    }

    /// Calls `callback(value, key, carry)` in order until it returns `false`.
    ///
    /// # Errors
    ///
    /// See [`every`](Self::every).
    pub fn every_with<C, R, F>(&self, carry: &mut C, mut callback: F) -> Result<bool>
    where
        R: CallbackOutput,
        F: FnMut(&Value, &Key, &mut C) -> R,
    {
        let mut run = || {
            for (key, value) in self.entries.iter() {
                let returned = callback::output(callback(value, key, carry), key, value)?;
                if callback::expect_bool_or_nil(&returned, "every", key)? == Some(false) {
                    return Ok(false);
                }
            }
            Ok::<_, Error>(true)
        };
        run().map_err(|e| self.fail("every", callback_argument(), e))
    }

    /// Returns the value with the greatest integer ranking.
    ///
    /// On ties the later entry wins.
    ///
    /// # Errors
    ///
    /// Fails if the callback returns an error or anything but an int.
    pub fn max_by<R, F>(&self, callback: F) -> Result<Option<&Value>>
    where
        R: CallbackOutput,
        F: FnMut(&Value, &Key) -> R,
    {
        self.rank_by("max_by", callback, |score, best| score >= best)
    }

    /// Returns the value with the least integer ranking.
    ///
    /// On ties the earlier entry wins.
    ///
    /// # Errors
    ///
    /// Fails if the callback returns an error or anything but an int.
    pub fn min_by<R, F>(&self, callback: F) -> Result<Option<&Value>>
    where
        R: CallbackOutput,
        F: FnMut(&Value, &Key) -> R,
    {
        self.rank_by("min_by", callback, |score, best| score < best)
    }

    fn rank_by<R, F>(
        &self,
        operation: &'static str,
        mut callback: F,
        replaces: fn(i64, i64) -> bool,
    ) -> Result<Option<&Value>>
    where
        R: CallbackOutput,
        F: FnMut(&Value, &Key) -> R,
    {
        let mut scan = || {
            let mut best: Option<(i64, &Value)> = None;
            for (key, value) in self.entries.iter() {
                let returned = callback::output(callback(value, key), key, value)?;
                let score = callback::expect_int(&returned, operation, key)?;
                if best.is_none_or(|(best_score, _)| replaces(score, best_score)) {
                    best = Some((score, value));
                }
            }
            Ok::<_, Error>(best.map(|(_, value)| value))
        };
        scan().map_err(|e| self.fail(operation, callback_argument(), e))
    }
}

// =============================================================================
// Trait implementations
// =============================================================================

impl<P: AcceptancePolicy> Clone for Collection<P> {
    fn clone(&self) -> Self {
        Self::trusted(self.entries.clone())
    }
}

impl<P: AcceptancePolicy> fmt::Debug for Collection<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", Self::type_label())?;
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<P: AcceptancePolicy> PartialEq for Collection<P> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<P: AcceptancePolicy> Eq for Collection<P> {}

impl<'a, P: AcceptancePolicy> IntoIterator for &'a Collection<P> {
    type Item = (&'a Key, &'a Value);
    type IntoIter = <&'a OrderedMap<Value> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        (&self.entries).into_iter()
    }
}
