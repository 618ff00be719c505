//! Named type registry.
//!
//! Named type gates accept only instances of one declared class or
//! interface. The declarations live in a process-wide [`TypeRegistry`]:
//!
//! ```text
//! register(TypeDecl::interface("Shape"))
//! register(TypeDecl::class("Polygon").implements("Shape"))
//! register(TypeDecl::class("Square").extends("Polygon"))
//!
//! is_subtype("Square", "Shape")  => true
//! ```
//!
//! Registration is idempotent for identical declarations; redeclaring a name
//! with a different shape is rejected.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use tracing::trace;

use crate::error::{Error, Result};

// =============================================================================
// TypeDef
// =============================================================================

/// Whether a named type can be instantiated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Concrete class; objects are instances of exactly one class.
    Class,
    /// Interface; implemented by classes, extended by interfaces.
    Interface,
}

/// Shared handle to a registered type.
pub type TypeRef = Arc<TypeDef>;

/// A resolved class or interface declaration.
pub struct TypeDef {
    name: Arc<str>,
    kind: TypeKind,
    parent: Option<TypeRef>,
    interfaces: Vec<TypeRef>,
}

impl TypeDef {
    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the shared name.
    #[must_use]
    pub fn name_arc(&self) -> Arc<str> {
        self.name.clone()
    }

    /// Returns whether this is a class or an interface.
    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Returns true for classes.
    #[must_use]
    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    /// Returns the parent class, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&TypeRef> {
        self.parent.as_ref()
    }

    /// Returns the directly implemented or extended interfaces.
    #[must_use]
    pub fn interfaces(&self) -> &[TypeRef] {
        &self.interfaces
    }

    /// Returns true if this type is `name` or inherits from it.
    #[must_use]
    pub fn is_subtype_of(&self, name: &str) -> bool {
        if &*self.name == name {
            return true;
        }
        self.parent.as_ref().is_some_and(|p| p.is_subtype_of(name))
            || self.interfaces.iter().any(|i| i.is_subtype_of(name))
    }

    fn matches(&self, decl: &TypeDecl) -> bool {
        self.kind == decl.kind
            && self.parent.as_ref().map(|p| p.name()) == decl.parent.as_deref()
            && self
                .interfaces
                .iter()
                .map(|i| i.name())
                .eq(decl.interfaces.iter().map(String::as_str))
    }
}

impl fmt::Debug for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("TypeDef");
        s.field("name", &self.name).field("kind", &self.kind);
        if let Some(parent) = &self.parent {
            s.field("parent", &parent.name());
        }
        if !self.interfaces.is_empty() {
            let names: Vec<_> = self.interfaces.iter().map(|i| i.name()).collect();
            s.field("interfaces", &names);
        }
        s.finish()
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// =============================================================================
// TypeDecl
// =============================================================================

/// Declaration of a class or interface, before registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    name: String,
    kind: TypeKind,
    parent: Option<String>,
    interfaces: Vec<String>,
}

impl TypeDecl {
    /// Declares a class.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            parent: None,
            interfaces: Vec::new(),
        }
    }

    /// Declares an interface.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Interface,
            parent: None,
            interfaces: Vec::new(),
        }
    }

    /// Sets the parent class of a class, or adds a parent interface of an
    /// interface.
    #[must_use]
    pub fn extends(mut self, name: impl Into<String>) -> Self {
        match self.kind {
            TypeKind::Class => self.parent = Some(name.into()),
            TypeKind::Interface => self.interfaces.push(name.into()),
        }
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn implements(mut self, name: impl Into<String>) -> Self {
        self.interfaces.push(name.into());
        self
    }

    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

// =============================================================================
// TypeRegistry
// =============================================================================

/// Registry of named types.
///
/// Most code uses the process-wide instance through the free functions of
/// this module; standalone registries are useful in tests.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<Arc<str>, TypeRef>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a declaration, resolving its supertypes.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error if the name is taken by a different
    /// declaration, a supertype is unknown, or the supertypes have the wrong
    /// kind (a class may only extend a class and implement interfaces; an
    /// interface may only extend interfaces).
    pub fn register(&mut self, decl: TypeDecl) -> Result<TypeRef> {
        if decl.name.is_empty() {
            return Err(Error::invalid_argument("type name must not be empty"));
        }
        if let Some(existing) = self.types.get(decl.name.as_str()) {
            if existing.matches(&decl) {
                return Ok(existing.clone());
            }
            return Err(Error::invalid_argument(format!(
                "type {} is already registered with a different declaration",
                decl.name
            )));
        }

        let parent = match &decl.parent {
            Some(name) => Some(self.lookup(name, TypeKind::Class, &decl.name)?),
            None => None,
        };
        let interfaces = decl
            .interfaces
            .iter()
            .map(|name| self.lookup(name, TypeKind::Interface, &decl.name))
            .collect::<Result<Vec<_>>>()?;

        let name: Arc<str> = decl.name.into();
        let def = Arc::new(TypeDef {
            name: name.clone(),
            kind: decl.kind,
            parent,
            interfaces,
        });
        trace!(name = %name, kind = ?def.kind, "registered named type");
        self.types.insert(name, def.clone());
        Ok(def)
    }

    fn lookup(&self, name: &str, kind: TypeKind, declaring: &str) -> Result<TypeRef> {
        let def = self.types.get(name).ok_or_else(|| {
            Error::invalid_argument(format!(
                "{declaring} refers to unknown type {name}"
            ))
        })?;
        if def.kind != kind {
            return Err(Error::invalid_argument(format!(
                "{declaring} cannot inherit from {name}: expected {kind:?}, found {:?}",
                def.kind
            )));
        }
        Ok(def.clone())
    }

    /// Looks a type up by name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<TypeRef> {
        self.types.get(name).cloned()
    }

    /// Returns true if a type with this name is registered.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns true if `sub` is registered and is `sup` or inherits from it.
    #[must_use]
    pub fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        self.types.get(sub).is_some_and(|def| def.is_subtype_of(sup))
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

// =============================================================================
// Process-wide registry
// =============================================================================

static GLOBAL: LazyLock<RwLock<TypeRegistry>> = LazyLock::new(|| RwLock::new(TypeRegistry::new()));

/// Registers a declaration in the process-wide registry.
///
/// # Errors
///
/// See [`TypeRegistry::register`].
pub fn register(decl: TypeDecl) -> Result<TypeRef> {
    GLOBAL
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(decl)
}

/// Looks a type up in the process-wide registry.
#[must_use]
pub fn resolve(name: &str) -> Option<TypeRef> {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .resolve(name)
}

/// Returns true if the process-wide registry knows `name`.
#[must_use]
pub fn exists(name: &str) -> bool {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .exists(name)
}

/// Subtype check against the process-wide registry.
#[must_use]
pub fn is_subtype(sub: &str, sup: &str) -> bool {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_subtype(sub, sup)
}
