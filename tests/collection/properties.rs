//! Property tests for collection invariants
//!
//! Checks immutability, ordering, deduplication and round-trip properties
//! over generated inputs.

use gated_collection::{Collection, IntCollection, IntGate};
use gated_foundation::{Key, Value};
use proptest::prelude::*;

/// Strategy for keys, mixing small ints and short strings.
fn key() -> impl Strategy<Value = Key> {
    prop_oneof![
        (-5_i64..50).prop_map(Key::Int),
        "[a-e]{1,3}".prop_map(Key::from),
    ]
}

/// Strategy for int collections with arbitrary keys.
fn int_collection() -> impl Strategy<Value = IntCollection> {
    prop::collection::vec((key(), -100_i64..100), 0..40)
        .prop_map(|entries| IntCollection::new(entries).unwrap_or_else(|e| panic!("{e}")))
}

/// Strategy for scalar values of mixed kinds.
fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[a-z]{0,4}".prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn operations_leave_receiver_unchanged(c in int_collection(), k in key(), n in -100_i64..100) {
        let before = c.to_array();
        let _ = c.with_added(n);
        let _ = c.with_set(k.clone(), n);
        let _ = c.with_removed(k);
        let _ = c.with_removed_element(n);
        let _ = c.to_reversed(false);
        let _ = c.to_sorted_by(|a, b| a.as_int().unwrap_or(0) - b.as_int().unwrap_or(0));
        prop_assert_eq!(c.to_array(), before);
    }

    #[test]
    fn round_trip_rekeys_sequentially(c in int_collection()) {
        let rebuilt = c.to_cleared().with_added_multiple(c.to_array_values()).unwrap();
        prop_assert_eq!(rebuilt.to_array_values(), c.to_array_values());
        prop_assert_eq!(rebuilt.to_sequential(), c.to_sequential());
    }

    #[test]
    fn unique_never_grows_and_keeps_extremes(c in int_collection(), use_first in any::<bool>()) {
        let parity = |v: &Value, _: &Key| v.as_int().map(|n| (n.rem_euclid(3)).to_string());
        let unique = c.to_unique_by(parity, use_first).unwrap();
        prop_assert!(unique.count() <= c.count());

        let entries = c.to_array();
        for (key, value) in unique.iter() {
            let print = value.as_int().unwrap_or(0).rem_euclid(3);
            let same: Vec<&Key> = entries
                .iter()
                .filter(|(_, v)| v.as_int().unwrap_or(0).rem_euclid(3) == print)
                .map(|(k, _)| k)
                .collect();
            let expected = if use_first { same.first() } else { same.last() };
            prop_assert_eq!(Some(&key), expected);
        }
    }

    #[test]
    fn sort_is_ordered_and_a_permutation(c in int_collection()) {
        let sorted = c.to_sorted_by(|a, b| a.as_int().unwrap_or(0) - b.as_int().unwrap_or(0)).unwrap();
        let values: Vec<i64> = sorted.values().filter_map(Value::as_int).collect();
        prop_assert!(values.windows(2).all(|w| w[0] <= w[1]));

        let mut original = c.to_array();
        let mut reordered = sorted.to_array();
        original.sort_by(|a, b| a.0.cmp(&b.0));
        reordered.sort_by(|a, b| a.0.cmp(&b.0));
        prop_assert_eq!(original, reordered);
    }

    #[test]
    fn reversing_twice_with_keys_is_identity(c in int_collection()) {
        prop_assert_eq!(c.to_reversed(true).to_reversed(true), c);
    }

    #[test]
    fn construction_rejects_exactly_the_invalid(values in prop::collection::vec(scalar(), 0..20)) {
        let invalid = values.iter().filter(|v| !matches!(v, Value::Int(_))).count();
        match Collection::<IntGate>::from_values(values.clone()) {
            Ok(c) => {
                prop_assert_eq!(invalid, 0);
                prop_assert_eq!(c.count(), values.len());
            }
            Err(e) => {
                prop_assert!(invalid > 0);
                let expected = format!("{invalid}/{} elements invalid", values.len());
                prop_assert!(e.report().contains(&expected));
            }
        }
    }

    #[test]
    fn slice_is_a_contiguous_run(c in int_collection(), offset in -50_i64..50, length in proptest::option::of(-50_i64..50)) {
        let slice = c.with_sliced(offset, length);
        let all = c.to_array();
        let part = slice.to_array();
        prop_assert!(part.len() <= all.len());
        if let Some(first) = part.first() {
            let start = all.iter().position(|e| e == first).unwrap();
            prop_assert_eq!(&all[start..start + part.len()], &part[..]);
        }
    }
}
