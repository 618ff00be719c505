//! Gated - Immutable, policy-gated collections
//!
//! This crate re-exports all layers of the Gated system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: gated_collection  - Collection<P>, acceptance policies, cursors
//! Layer 0: gated_foundation  - Value, Key, OrderedMap, named types, Error
//! ```

pub use gated_collection as collection;
pub use gated_foundation as foundation;
