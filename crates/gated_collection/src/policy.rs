//! Element acceptance policies.
//!
//! A policy decides which values a collection may hold. Policies are types,
//! not values: every instance of `Collection<IntGate>` shares the same rule,
//! and the rule is consulted through associated functions only.
//!
//! ```text
//! Unrestricted          any value
//! PrimitiveGate<K>      exactly one scalar kind (IntKind, FloatKind, ...)
//! OpenObjectGate        any object, no scalars
//! NamedTypeGate<T>      objects whose class is T::NAME or inherits from it
//! ```

use std::fmt;
use std::marker::PhantomData;

use gated_foundation::{Error, Result, Type, Value, registry};

/// Static description of a policy, used to decide merge compatibility.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PolicyDescriptor {
    /// Accepts every value.
    Any,
    /// Accepts exactly one scalar kind.
    Primitive(Type),
    /// Accepts any object.
    Object,
    /// Accepts instances of one named type.
    Named(&'static str),
}

impl PolicyDescriptor {
    /// Returns true if a collection gated by `other` may be merged into one
    /// gated by `self`.
    ///
    /// A wider source (`Any`, or `Object` into a named gate) is admitted and
    /// its elements are checked one by one during the merge. Two concrete
    /// gates must match: a primitive gate admits only the same kind, and a
    /// named gate admits itself and its registered subtypes, so
    /// `Named("Shape")` admits `Named("Square")` once `Square` extends
    /// `Shape`.
    #[must_use]
    pub fn admits(self, other: Self) -> bool {
        match (self, other) {
            (Self::Any, _)
            | (_, Self::Any)
            | (Self::Object | Self::Named(_), Self::Object)
            | (Self::Object, Self::Named(_)) => true,
            (Self::Primitive(a), Self::Primitive(b)) => a == b,
            (Self::Named(a), Self::Named(b)) => a == b || registry::is_subtype(b, a),
            _ => false,
        }
    }
}

impl fmt::Display for PolicyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Primitive(ty) => write!(f, "{ty}"),
            Self::Object => f.write_str("object"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Rule deciding whether a value may be stored in a collection.
pub trait AcceptancePolicy: 'static {
    /// Returns the static description of this policy.
    fn descriptor() -> PolicyDescriptor;

    /// Returns true if `value` may be stored.
    fn is_accepted(value: &Value) -> bool;

    /// Human-readable description of what this policy accepts.
    fn describe() -> String {
        Self::descriptor().to_string()
    }

    /// Fails with an unacceptable element error if `value` is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnacceptableElement`](gated_foundation::ErrorKind::UnacceptableElement)
    /// naming the value and what was expected.
    fn assert_accepted(value: &Value) -> Result<()> {
        if Self::is_accepted(value) {
            Ok(())
        } else {
            Err(Error::unacceptable_element(value, Self::describe()))
        }
    }

    /// Checks preconditions of the policy itself, once per construction.
    ///
    /// # Errors
    ///
    /// Policies that depend on external state (such as a registered type)
    /// fail here when that state is missing.
    fn verify() -> Result<()> {
        Ok(())
    }
}

// =============================================================================
// Unrestricted
// =============================================================================

/// Accepts every value.
#[derive(Copy, Clone, Debug, Default)]
pub struct Unrestricted;

impl AcceptancePolicy for Unrestricted {
    fn descriptor() -> PolicyDescriptor {
        PolicyDescriptor::Any
    }

    fn is_accepted(_value: &Value) -> bool {
        true
    }
}

// =============================================================================
// PrimitiveGate
// =============================================================================

/// Marker for a scalar kind a [`PrimitiveGate`] admits.
pub trait Primitive: 'static {
    /// The admitted kind.
    const TYPE: Type;
}

/// Marker: integers.
#[derive(Copy, Clone, Debug, Default)]
pub struct IntKind;

/// Marker: floats.
#[derive(Copy, Clone, Debug, Default)]
pub struct FloatKind;

/// Marker: strings.
#[derive(Copy, Clone, Debug, Default)]
pub struct StringKind;

/// Marker: booleans.
#[derive(Copy, Clone, Debug, Default)]
pub struct BoolKind;

/// Marker: date-times.
#[derive(Copy, Clone, Debug, Default)]
pub struct DateTimeKind;

impl Primitive for IntKind {
    const TYPE: Type = Type::Int;
}

impl Primitive for FloatKind {
    const TYPE: Type = Type::Float;
}

impl Primitive for StringKind {
    const TYPE: Type = Type::String;
}

impl Primitive for BoolKind {
    const TYPE: Type = Type::Bool;
}

impl Primitive for DateTimeKind {
    const TYPE: Type = Type::DateTime;
}

/// Accepts values of exactly one scalar kind.
#[derive(Copy, Clone, Debug, Default)]
pub struct PrimitiveGate<K>(PhantomData<K>);

impl<K: Primitive> AcceptancePolicy for PrimitiveGate<K> {
    fn descriptor() -> PolicyDescriptor {
        PolicyDescriptor::Primitive(K::TYPE)
    }

    fn is_accepted(value: &Value) -> bool {
        K::TYPE.accepts(value.value_type())
    }
}

/// Integers only.
pub type IntGate = PrimitiveGate<IntKind>;
/// Floats only.
pub type FloatGate = PrimitiveGate<FloatKind>;
/// Strings only.
pub type StringGate = PrimitiveGate<StringKind>;
/// Booleans only.
pub type BoolGate = PrimitiveGate<BoolKind>;
/// Date-times only.
pub type DateTimeGate = PrimitiveGate<DateTimeKind>;

// =============================================================================
// OpenObjectGate
// =============================================================================

/// Accepts any object and rejects scalars.
#[derive(Copy, Clone, Debug, Default)]
pub struct OpenObjectGate;

impl AcceptancePolicy for OpenObjectGate {
    fn descriptor() -> PolicyDescriptor {
        PolicyDescriptor::Object
    }

    fn is_accepted(value: &Value) -> bool {
        matches!(value, Value::Object(_))
    }
}

// =============================================================================
// NamedTypeGate
// =============================================================================

/// A class or interface a [`NamedTypeGate`] is bound to.
///
/// Usually declared with [`named_collection!`](crate::named_collection).
pub trait HandledType: 'static {
    /// Registered name of the handled type.
    const NAME: &'static str;
}

/// Accepts objects that are instances of `T::NAME`.
///
/// The handled type must be registered before any collection using this
/// gate is constructed.
#[derive(Copy, Clone, Debug, Default)]
pub struct NamedTypeGate<T>(PhantomData<T>);

impl<T: HandledType> AcceptancePolicy for NamedTypeGate<T> {
    fn descriptor() -> PolicyDescriptor {
        PolicyDescriptor::Named(T::NAME)
    }

    fn is_accepted(value: &Value) -> bool {
        value.as_object().is_some_and(|o| o.is_instance_of(T::NAME))
    }

    fn verify() -> Result<()> {
        if registry::exists(T::NAME) {
            Ok(())
        } else {
            Err(Error::handled_type_missing(T::NAME))
        }
    }
}
