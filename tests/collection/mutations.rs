//! Integration tests for copy-on-write operations
//!
//! Tests that every `with_*` operation leaves the receiver untouched and
//! produces the documented keys.

use gated_collection::{
    Collection, FloatCollection, IntCollection, ObjectCollection, StringCollection, Unrestricted,
};
use gated_foundation::{ErrorKind, Key, Value};

fn scenario() -> Collection {
    Collection::new([
        (Key::Int(0), Value::Int(10)),
        (Key::from("foo"), Value::Int(20)),
        (Key::Int(42), Value::Int(30)),
        (Key::Int(43), Value::Int(40)),
    ])
    .unwrap()
}

fn keys<P: gated_collection::AcceptancePolicy>(c: &Collection<P>) -> Vec<Key> {
    c.keys().cloned().collect()
}

// =============================================================================
// Immutability
// =============================================================================

#[test]
fn receiver_is_unchanged_by_every_operation() {
    let c = scenario();
    let before = c.to_array();

    let _ = c.with_added(1);
    let _ = c.with_added_multiple([1, 2]);
    let _ = c.with_filtered(|_, _| false);
    let _ = c.with_merged(&scenario());
    let _ = c.with_removed(0);
    let _ = c.with_removed_element(10);
    let _ = c.with_set("foo", 0);
    let _ = c.with_sliced(1, Some(1));
    let _ = c.to_cleared();
    let _ = c.to_reversed(false);
    let _ = c.to_sequential();
    let _ = c.to_sorted_by(|_, _| 0);
    let _ = c.to_unique_by(|_, _| "same", true);

    assert_eq!(c.to_array(), before);
}

#[test]
fn scenario_removal() {
    let removed = scenario().with_removed(42).unwrap();
    assert_eq!(removed.count(), 3);
    assert_eq!(keys(&removed), vec![Key::Int(0), Key::from("foo"), Key::Int(43)]);
}

// =============================================================================
// Adding
// =============================================================================

#[test]
fn added_after_removal_does_not_reuse_key() {
    let c = scenario().with_removed(43).unwrap().with_added(50).unwrap();
    assert_eq!(c.last_key(), Some(&Key::Int(44)));
}

#[test]
fn added_multiple_discards_batch_keys() {
    let c = IntCollection::new([("x", 1)]).unwrap();
    let grown = c.with_added_multiple(vec![2, 3]).unwrap();
    assert_eq!(keys(&grown), vec![Key::from("x"), Key::Int(0), Key::Int(1)]);
}

#[test]
fn added_multiple_is_all_or_nothing() {
    let c = IntCollection::from_values([1]).unwrap();
    let err = c
        .with_added_multiple([Value::Int(2), Value::from("3"), Value::Int(4)])
        .unwrap_err();
    assert!(err.report().contains("1/3 elements invalid"));
    assert_eq!(c.count(), 1);
}

#[test]
fn round_trip_through_cleared() {
    let c = scenario();
    let rebuilt = c.to_cleared().with_added_multiple(c.to_array_values()).unwrap();
    assert_eq!(rebuilt.to_array_values(), c.to_array_values());
    assert_eq!(keys(&rebuilt), (0..4).map(Key::Int).collect::<Vec<_>>());
}

// =============================================================================
// Merging
// =============================================================================

#[test]
fn merge_renumbers_int_keys() {
    let a = StringCollection::from_values(["a", "b"]).unwrap();
    let b = StringCollection::from_values(["c", "d"]).unwrap();
    let merged = a.with_merged(&b).unwrap();
    assert_eq!(keys(&merged), (0..4).map(Key::Int).collect::<Vec<_>>());
    assert_eq!(
        merged.to_array_values(),
        vec![Value::from("a"), Value::from("b"), Value::from("c"), Value::from("d")]
    );
}

#[test]
fn merge_overwrites_string_keys() {
    let a = StringCollection::new([("k", "a")]).unwrap();
    let b = StringCollection::new([("k", "b")]).unwrap();
    let merged = a.with_merged(&b).unwrap();
    assert_eq!(merged.count(), 1);
    assert_eq!(merged.get("k").unwrap(), Some(&Value::from("b")));
}

#[test]
fn merge_rejects_incompatible_policy() {
    let ints = IntCollection::from_values([1]).unwrap();
    let floats = FloatCollection::from_values([1.0]).unwrap();
    let err = ints.with_merged(&floats).unwrap_err();
    let inner = err.inner().unwrap();
    assert!(matches!(inner.kind, ErrorKind::UnacceptableCollection { .. }));
    assert!(inner.inner().is_none());
}

#[test]
fn merge_rejects_unacceptable_element_from_open_collection() {
    let ints = IntCollection::from_values([1]).unwrap();
    let open = Collection::<Unrestricted>::from_values([Value::Int(2), Value::Nil]).unwrap();
    let err = ints.with_merged(&open).unwrap_err();
    let report = err.report();
    assert!(report.contains("unacceptable collection"), "{report}");
    assert!(report.contains("unacceptable element nil"), "{report}");
}

#[test]
fn merge_from_open_collection_checks_each_element() {
    let ints = IntCollection::from_values([1]).unwrap();
    let open = Collection::<Unrestricted>::from_values([2, 3]).unwrap();
    let merged = ints.with_merged(&open).unwrap();
    assert_eq!(merged.to_array_values(), vec![Value::Int(1), Value::Int(2), Value::Int(3)]);

    let objects = ObjectCollection::empty().unwrap();
    let err = ints.with_merged(&objects).unwrap_err();
    let inner = err.inner().unwrap();
    assert!(matches!(inner.kind, ErrorKind::UnacceptableCollection { .. }));
}

#[test]
fn add_after_last_int_key_fails_without_overwriting() {
    let c = StringCollection::new([(i64::MAX, "keep")]).unwrap();
    let err = c.with_added("new").unwrap_err();
    let report = err.report();
    assert!(report.starts_with("failure in with_added"), "{report}");
    assert!(report.contains("already occupied"), "{report}");
    assert_eq!(c.count(), 1);
    assert_eq!(c.get(i64::MAX).unwrap(), Some(&Value::from("keep")));
}

#[test]
fn unrestricted_accepts_any_merge() {
    let any = Collection::<Unrestricted>::from_values(["x"]).unwrap();
    let ints = IntCollection::from_values([1]).unwrap();
    assert_eq!(any.with_merged(&ints).unwrap().count(), 2);
}

// =============================================================================
// Removing, Setting, Slicing
// =============================================================================

#[test]
fn removing_absent_key_is_noop() {
    let c = scenario();
    let same = c.with_removed(1000).unwrap();
    assert_eq!(same, c);
}

#[test]
fn removing_element_validates_value() {
    let c = IntCollection::from_values([5, 6, 5]).unwrap();
    assert_eq!(keys(&c.with_removed_element(5).unwrap()), vec![Key::Int(1), Key::Int(2)]);
    assert_eq!(c.with_removed_element(7).unwrap(), c);
    let err = c.with_removed_element("5").unwrap_err();
    assert!(err.has_kind(|k| matches!(k, ErrorKind::UnacceptableElement { .. })));
}

#[test]
fn set_reports_key_and_value_together() {
    let c = IntCollection::from_values([1]).unwrap();
    let err = c.with_set(Value::Float(1.0), "x").unwrap_err();
    let report = err.report();
    assert!(report.contains("invalid argument"), "{report}");
    assert!(report.contains("unacceptable element \"x\""), "{report}");
}

#[test]
fn set_appends_new_keys() {
    let c = IntCollection::from_values([1]).unwrap().with_set("n", 2).unwrap();
    assert_eq!(keys(&c), vec![Key::Int(0), Key::from("n")]);
}

#[test]
fn slicing_semantics() {
    let c = IntCollection::from_values([0, 1, 2, 3, 4]).unwrap();
    let values = |s: IntCollection| s.to_array_values();
    assert_eq!(values(c.with_sliced(2, None)), vec![Value::Int(2), Value::Int(3), Value::Int(4)]);
    assert_eq!(values(c.with_sliced(-2, Some(1))), vec![Value::Int(3)]);
    assert_eq!(values(c.with_sliced(1, Some(-3))), vec![Value::Int(1)]);
    assert!(c.with_sliced(3, Some(-3)).is_empty());
    assert_eq!(keys(&c.with_sliced(3, None)), vec![Key::Int(3), Key::Int(4)]);
}

#[test]
fn filtered_preserves_keys() {
    let c = IntCollection::from_values([0, 5, 0, 7]).unwrap();
    let kept = c.with_filtered(|v, _| v.clone()).unwrap();
    assert_eq!(keys(&kept), vec![Key::Int(1), Key::Int(3)]);
}
