//! Callback return contracts.
//!
//! Callbacks handed to collection operations may return plain Rust values
//! (`bool`, integers, strings, `()`), a [`Value`], an `Option` of those, or a
//! `Result` whose error is boxed into the failure chain. Each operation then
//! checks the returned value against its own contract: `find` wants a bool,
//! `max_by` an int, `to_unique_by` a string, and so on.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use gated_foundation::{BoxError, Error, Key, Object, Result, Value};

/// Something a callback may return.
pub trait CallbackOutput {
    /// Converts the return into a value, or the callback's own error.
    ///
    /// # Errors
    ///
    /// Returns the error carried by a `Result` return.
    fn into_output(self) -> std::result::Result<Value, BoxError>;
}

impl CallbackOutput for Value {
    fn into_output(self) -> std::result::Result<Value, BoxError> {
        Ok(self)
    }
}

impl CallbackOutput for () {
    fn into_output(self) -> std::result::Result<Value, BoxError> {
        Ok(Value::Nil)
    }
}

macro_rules! value_outputs {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CallbackOutput for $ty {
                fn into_output(self) -> std::result::Result<Value, BoxError> {
                    Ok(Value::from(self))
                }
            }
        )*
    };
}

value_outputs!(bool, i64, i32, u32, f64, &str, String, Arc<str>, DateTime<Utc>, Object);

impl<T: CallbackOutput> CallbackOutput for Option<T> {
    fn into_output(self) -> std::result::Result<Value, BoxError> {
        self.map_or(Ok(Value::Nil), CallbackOutput::into_output)
    }
}

impl<T, E> CallbackOutput for std::result::Result<T, E>
where
    T: CallbackOutput,
    E: Into<BoxError>,
{
    fn into_output(self) -> std::result::Result<Value, BoxError> {
        self.map_err(Into::into)?.into_output()
    }
}

/// Converts a callback return for the call made with `key`/`value`.
///
/// An `Err` from the callback becomes a callback-failed error that records
/// the key and value it was called with.
pub(crate) fn output<R: CallbackOutput>(returned: R, key: &Key, value: &Value) -> Result<Value> {
    returned
        .into_output()
        .map_err(|cause| Error::callback_failed(key, value, cause))
}

fn call_site(operation: &str, key: &Key) -> String {
    format!("{operation} callback for key {key:?}")
}

/// Requires a bool.
pub(crate) fn expect_bool(returned: &Value, operation: &str, key: &Key) -> Result<bool> {
    returned
        .as_bool()
        .ok_or_else(|| Error::invalid_return("bool", returned, call_site(operation, key)))
}

/// Requires a bool or nil; nil reads as `None`.
pub(crate) fn expect_bool_or_nil(
    returned: &Value,
    operation: &str,
    key: &Key,
) -> Result<Option<bool>> {
    match returned {
        Value::Nil => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        other => Err(Error::invalid_return(
            "bool or nil",
            other,
            call_site(operation, key),
        )),
    }
}

/// Requires an int.
pub(crate) fn expect_int(returned: &Value, operation: &str, key: &Key) -> Result<i64> {
    returned
        .as_int()
        .ok_or_else(|| Error::invalid_return("int", returned, call_site(operation, key)))
}

/// Requires a string.
pub(crate) fn expect_string(returned: Value, operation: &str, key: &Key) -> Result<Arc<str>> {
    match returned {
        Value::String(s) => Ok(s),
        other => Err(Error::invalid_return(
            "string",
            &other,
            call_site(operation, key),
        )),
    }
}
