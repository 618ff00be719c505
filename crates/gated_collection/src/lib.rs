//! Immutable, policy-gated collections.
//!
//! This crate provides:
//! - [`Collection`] - Ordered key-value collection gated by an acceptance policy
//! - [`AcceptancePolicy`] - The rule deciding which values a collection may hold
//! - [`Cursor`] - Explicit traversal over a collection
//! - [`CallbackOutput`] - What callbacks passed to collection operations may return
//! - [`NamedTypeCollection`] and [`named_collection!`] - Collections of one named type
//!
//! Every operation that changes contents returns a new collection; the
//! receiver is never modified. Failures come back as a chained
//! [`Error`](gated_foundation::Error) whose outermost layer names the
//! operation that failed.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod callback;
pub mod collection;
pub mod convenience;
pub mod cursor;
pub mod named;
pub mod policy;
#[cfg(feature = "serde")]
mod serde_impl;

pub use callback::CallbackOutput;
pub use collection::Collection;
pub use convenience::{
    BoolCollection, DateTimeCollection, FloatCollection, IntCollection, ObjectCollection,
    StringCollection,
};
pub use cursor::Cursor;
pub use named::NamedTypeCollection;
pub use policy::{
    AcceptancePolicy, BoolGate, DateTimeGate, FloatGate, HandledType, IntGate, NamedTypeGate,
    OpenObjectGate, PolicyDescriptor, Primitive, PrimitiveGate, StringGate, Unrestricted,
};
