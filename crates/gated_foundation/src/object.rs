//! Instances of registered classes.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::registry::{self, TypeRef};
use crate::value::Value;

/// Shared handle to an instance of a registered class.
///
/// Objects compare by identity: two handles are equal only if they point at
/// the same instance, mirroring how reference types behave in the
/// collections that hold them.
#[derive(Clone)]
pub struct Object(Arc<ObjectData>);

struct ObjectData {
    class: TypeRef,
    fields: BTreeMap<Arc<str>, Value>,
}

impl Object {
    /// Creates an instance of `class`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error if `class` is an interface.
    pub fn new(class: TypeRef) -> Result<Self> {
        Self::with_fields(class, BTreeMap::new())
    }

    /// Creates an instance of `class` with initial fields.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error if `class` is an interface.
    pub fn with_fields(class: TypeRef, fields: BTreeMap<Arc<str>, Value>) -> Result<Self> {
        if !class.is_class() {
            return Err(Error::invalid_argument(format!(
                "cannot instantiate interface {}",
                class.name()
            )));
        }
        Ok(Self(Arc::new(ObjectData { class, fields })))
    }

    /// Creates an instance of the registered class called `name`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error if no such type is registered or it
    /// is an interface.
    pub fn instantiate(name: &str) -> Result<Self> {
        let class = registry::resolve(name)
            .ok_or_else(|| Error::invalid_argument(format!("unknown type {name}")))?;
        Self::new(class)
    }

    /// Returns a new instance with the same class and fields plus `name`.
    ///
    /// The new instance has its own identity.
    #[must_use]
    pub fn with_field(&self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        let mut fields = self.0.fields.clone();
        fields.insert(name.into(), value.into());
        Self(Arc::new(ObjectData {
            class: self.0.class.clone(),
            fields,
        }))
    }

    /// Returns the class of this object.
    #[must_use]
    pub fn class(&self) -> &TypeRef {
        &self.0.class
    }

    /// Returns the class name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.0.class.name()
    }

    /// Returns true if this object's class is `name` or inherits from it.
    #[must_use]
    pub fn is_instance_of(&self, name: &str) -> bool {
        self.0.class.is_subtype_of(name)
    }

    /// Gets a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.fields.get(name)
    }

    /// Returns an iterator over fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.fields.iter().map(|(k, v)| (&**k, v))
    }

    /// Returns true if both handles point at the same instance.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
    }
}

impl Eq for Object {}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())?;
        f.debug_map().entries(self.fields()).finish()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.type_name())?;
        for (i, (name, value)) in self.fields().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}
