//! Integration tests for collection construction
//!
//! Tests validation on construction and the shape of rejection errors.

use gated_collection::{Collection, IntCollection, StringCollection};
use gated_foundation::{DiagnosticsConfig, ErrorKind, Key, OrderedMap, Value};

// =============================================================================
// Successful Construction
// =============================================================================

#[test]
fn keeps_keys_and_order() {
    let c: Collection = Collection::new([
        (Key::from("z"), Value::Int(1)),
        (Key::Int(9), Value::Int(2)),
        (Key::from("a"), Value::Int(3)),
    ])
    .unwrap();

    let keys: Vec<_> = c.keys().cloned().collect();
    assert_eq!(keys, vec![Key::from("z"), Key::Int(9), Key::from("a")]);
}

#[test]
fn from_values_is_sequential() {
    let c = StringCollection::from_values(["a", "b", "c"]).unwrap();
    let keys: Vec<_> = c.keys().cloned().collect();
    assert_eq!(keys, vec![Key::Int(0), Key::Int(1), Key::Int(2)]);
}

#[test]
fn from_map_and_empty() {
    let map = OrderedMap::sequential([Value::Int(1)]).insert(Key::from("k"), Value::Int(2));
    let c = IntCollection::from_map(map.clone()).unwrap();
    assert_eq!(c.as_map(), &map);
    assert!(IntCollection::empty().unwrap().is_empty());
}

#[test]
fn duplicate_keys_keep_first_position_last_value() {
    let c: Collection = Collection::new([("a", 1), ("b", 2), ("a", 3)]).unwrap();
    assert_eq!(c.count(), 2);
    assert_eq!(c.first(), Some(&Value::Int(3)));
}

// =============================================================================
// Rejected Construction
// =============================================================================

#[test]
fn rejection_counts_invalid_and_total() {
    let err = IntCollection::from_values([Value::Int(1), Value::from("x"), Value::Float(2.0)])
        .unwrap_err();

    assert!(matches!(&err.kind, ErrorKind::Failure { operation } if operation == "from_values"));
    let report = err.report();
    assert!(report.contains("2/3 elements invalid"), "{report}");
    assert!(report.contains("1 => \"x\""), "{report}");
    assert!(report.contains("2 => 2.0"), "{report}");
}

#[test]
fn rejection_names_exactly_the_invalid_keys() {
    let err = IntCollection::new([
        (Key::from("ok"), Value::Int(1)),
        (Key::from("bad"), Value::Bool(true)),
        (Key::Int(7), Value::Nil),
    ])
    .unwrap_err();

    let Some(ErrorKind::UnacceptableElements { sample, .. }) = err.inner().map(|e| &e.kind) else {
        panic!("unexpected error: {err:?}");
    };
    let keys: Vec<_> = sample.keys().cloned().collect();
    assert_eq!(keys, vec![Key::from("bad"), Key::Int(7)]);
}

#[test]
fn rejection_sample_is_bounded() {
    let limit = DiagnosticsConfig::current().sample_size;
    let err = IntCollection::from_values((0..limit + 10).map(|_| "nope")).unwrap_err();

    let Some(ErrorKind::UnacceptableElements {
        invalid,
        total,
        sample,
    }) = err.inner().map(|e| &e.kind)
    else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(*invalid, limit + 10);
    assert_eq!(*total, limit + 10);
    assert_eq!(sample.items().len(), limit);
    assert_eq!(sample.omitted(), 10);
}

#[test]
fn malformed_key_fails_construction() {
    let err = Collection::<gated_collection::Unrestricted>::new([(Value::Nil, 1)]).unwrap_err();
    assert!(err.has_kind(|k| matches!(k, ErrorKind::InvalidArgument(_))));
}
