//! Type descriptors for value kinds.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Descriptor for the kind of a [`Value`](crate::Value).
///
/// Acceptance policies use these to gate elements and to describe what they
/// expected when an element is rejected.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// The nil type (only value: nil).
    Nil,
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// String type.
    String,
    /// UTC date-time.
    DateTime,
    /// Instance of a registered named type.
    Object,
    /// Any type (accepts any value).
    Any,
}

impl Type {
    /// Returns true if this type is `Any`.
    #[must_use]
    pub const fn is_any(self) -> bool {
        matches!(self, Self::Any)
    }

    /// Returns true for the scalar kinds.
    ///
    /// Everything except `Object` and `Any` is a scalar.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        !matches!(self, Self::Object | Self::Any)
    }

    /// Checks if a value of type `value_type` is accepted by this type.
    ///
    /// Unlike schema typing there is no numeric promotion: a `Float` gate
    /// rejects integers.
    #[must_use]
    pub fn accepts(self, value_type: Type) -> bool {
        self.is_any() || self == value_type
    }

    /// Returns the lowercase name of this type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::DateTime => "datetime",
            Self::Object => "object",
            Self::Any => "any",
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
