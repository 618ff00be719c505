//! Values, keys, named types and errors for gated collections.
//!
//! This crate provides:
//! - [`Value`] - The dynamically typed element stored in collections
//! - [`Key`] - Integer or string keys, and [`IntoKey`] conversion
//! - [`OrderedMap`] - Insertion-ordered persistent map
//! - [`Type`] - Kind descriptors used by acceptance policies
//! - [`TypeRegistry`] and [`Object`] - Named classes, interfaces and instances
//! - [`Error`] - Chained errors with operation context
//! - [`DiagnosticsConfig`] and [`render`] - Bounded rendering for messages

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod config;
pub mod error;
pub mod key;
pub mod object;
pub mod registry;
pub mod render;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod types;
pub mod value;

pub use collections::OrderedMap;
pub use config::DiagnosticsConfig;
pub use error::{BoxError, Error, ErrorContext, ErrorKind, Result};
pub use key::{IntoKey, Key};
pub use object::Object;
pub use registry::{TypeDecl, TypeDef, TypeKind, TypeRef, TypeRegistry};
pub use render::Sample;
pub use types::Type;
pub use value::Value;
