//! Keys for ordered collections.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, ErrorKind, Result};
use crate::value::Value;

/// Key of an entry in an [`OrderedMap`](crate::OrderedMap).
///
/// Keys are either integers or strings. The two never compare equal, so
/// `Key::Int(1)` and `Key::Str("1")` address different entries.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Integer key (sequential keys are assigned from zero).
    Int(i64),
    /// String key.
    Str(Arc<str>),
}

impl Key {
    /// Attempts to extract an integer key.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(_) => None,
        }
    }

    /// Attempts to extract a string key.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(s) => Some(s),
        }
    }

    /// Returns true for integer keys.
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Converts the key into a value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(n) => Value::Int(*n),
            Self::Str(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Str(s.into())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Str(s.into())
    }
}

impl From<Arc<str>> for Key {
    fn from(s: Arc<str>) -> Self {
        Self::Str(s)
    }
}

/// Fallible conversion into a [`Key`].
///
/// Infallible for key-shaped types; values must be an int or a string,
/// anything else fails with [`ErrorKind::InvalidArgument`].
pub trait IntoKey {
    /// Converts `self` into a key.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error when `self` has no key shape.
    fn into_key(self) -> Result<Key>;
}

impl IntoKey for Key {
    fn into_key(self) -> Result<Key> {
        Ok(self)
    }
}

impl IntoKey for &Key {
    fn into_key(self) -> Result<Key> {
        Ok(self.clone())
    }
}

impl IntoKey for i64 {
    fn into_key(self) -> Result<Key> {
        Ok(Key::Int(self))
    }
}

impl IntoKey for i32 {
    fn into_key(self) -> Result<Key> {
        Ok(Key::from(self))
    }
}

impl IntoKey for usize {
    fn into_key(self) -> Result<Key> {
        i64::try_from(self)
            .map(Key::Int)
            .map_err(|_| Error::invalid_argument(format!("key {self} does not fit in i64")))
    }
}

impl IntoKey for &str {
    fn into_key(self) -> Result<Key> {
        Ok(Key::from(self))
    }
}

impl IntoKey for String {
    fn into_key(self) -> Result<Key> {
        Ok(Key::from(self))
    }
}

impl IntoKey for Arc<str> {
    fn into_key(self) -> Result<Key> {
        Ok(Key::Str(self))
    }
}

impl IntoKey for &Value {
    fn into_key(self) -> Result<Key> {
        match self {
            Value::Int(n) => Ok(Key::Int(*n)),
            Value::String(s) => Ok(Key::Str(s.clone())),
            other => Err(Error::new(ErrorKind::InvalidArgument(format!(
                "key must be int or string, got {}",
                other.value_type()
            )))),
        }
    }
}

impl IntoKey for Value {
    fn into_key(self) -> Result<Key> {
        (&self).into_key()
    }
}
