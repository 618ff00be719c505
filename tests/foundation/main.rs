//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, Key, OrderedMap, named types and Error chains.

mod collections;
