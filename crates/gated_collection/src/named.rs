//! Collections of one named type.
//!
//! A named collection holds instances of a single registered class or
//! interface. The handled type is checked once when a collection is
//! constructed; a missing type is reported as
//! [`ErrorKind::HandledTypeMissing`](gated_foundation::ErrorKind::HandledTypeMissing),
//! distinct from elements being invalid.

use gated_foundation::{Error, Result, TypeRef, registry};

use crate::collection::Collection;
use crate::policy::{HandledType, NamedTypeGate};

/// A collection gated on the named type `T`.
pub type NamedTypeCollection<T> = Collection<NamedTypeGate<T>>;

impl<T: HandledType> Collection<NamedTypeGate<T>> {
    /// Returns the name of the handled type.
    #[must_use]
    pub fn handled_type_name() -> &'static str {
        T::NAME
    }

    /// Resolves the handled type in the registry.
    ///
    /// # Errors
    ///
    /// Fails if the handled type is not registered.
    pub fn handled_type() -> Result<TypeRef> {
        registry::resolve(T::NAME).ok_or_else(|| Error::handled_type_missing(T::NAME))
    }
}

/// Declares a named collection type.
///
/// Expands to a marker type implementing [`HandledType`] and an alias of
/// [`NamedTypeCollection`] over it:
///
/// ```ignore
/// named_collection!(pub ShapeCollection, ShapeType => "Shape");
///
/// let shapes = ShapeCollection::from_values(objects)?;
/// assert_eq!(ShapeCollection::handled_type_name(), "Shape");
/// ```
#[macro_export]
macro_rules! named_collection {
    ($vis:vis $alias:ident, $marker:ident => $name:literal) => {
        #[doc = concat!("Handled type marker for `", $name, "`.")]
        #[derive(Copy, Clone, Debug, Default)]
        $vis struct $marker;

        impl $crate::HandledType for $marker {
            const NAME: &'static str = $name;
        }

        #[doc = concat!("Collection of `", $name, "` instances.")]
        $vis type $alias = $crate::NamedTypeCollection<$marker>;
    };
}
