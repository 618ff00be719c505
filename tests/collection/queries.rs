//! Integration tests for collection queries
//!
//! Tests lookups, callbacks with return contracts, ranking and export.

use gated_collection::{Collection, FloatCollection, IntCollection, StringCollection};
use gated_foundation::{Error, ErrorKind, Key, Value};

fn scenario() -> Collection {
    Collection::new([
        (Key::Int(0), Value::Int(10)),
        (Key::from("foo"), Value::Int(20)),
        (Key::Int(42), Value::Int(30)),
        (Key::Int(43), Value::Int(40)),
    ])
    .unwrap()
}

// =============================================================================
// Lookups
// =============================================================================

#[test]
fn scenario_lookups() {
    let c = scenario();
    assert_eq!(c.get(42).unwrap(), Some(&Value::Int(30)));
    assert_eq!(c.get(99).unwrap(), None);
    assert_eq!(
        c.to_array_values(),
        vec![Value::Int(10), Value::Int(20), Value::Int(30), Value::Int(40)]
    );
}

#[test]
fn string_keys_are_not_ints() {
    let c = scenario();
    assert_eq!(c.get("42").unwrap(), None);
    assert!(c.has(42).unwrap());
    assert!(!c.has("42").unwrap());
}

#[test]
fn key_from_value_must_be_int_or_string() {
    let c = scenario();
    assert_eq!(c.get(Value::from("foo")).unwrap(), Some(&Value::Int(20)));
    let err = c.has(Value::Float(0.0)).unwrap_err();
    assert!(err.has_kind(|k| matches!(k, ErrorKind::InvalidArgument(_))));
}

#[test]
fn contains_validates_against_policy() {
    let c = IntCollection::from_values([1, 2, 3]).unwrap();
    assert!(c.contains(2).unwrap());
    let err = c.contains(2.0).unwrap_err();
    let kinds: Vec<_> = err.kinds().collect();
    assert!(matches!(kinds[0], ErrorKind::Failure { .. }));
    assert!(matches!(kinds[1], ErrorKind::InvalidArgument(_)));
    assert!(matches!(kinds[2], ErrorKind::UnacceptableElement { .. }));
}

#[test]
fn signed_zeroes_are_the_same_float() {
    let c = FloatCollection::from_values([1.5, -0.0]).unwrap();
    assert!(c.contains(0.0).unwrap());
    assert_eq!(c.index_of(0.0).unwrap(), Some(&Key::Int(1)));
    assert_eq!(c.with_removed_element(0.0).unwrap().count(), 1);
}

#[test]
fn strict_lookups_fail_on_absence() {
    let c = scenario();
    assert_eq!(c.require("foo").unwrap(), &Value::Int(20));
    assert!(c.require("bar").unwrap_err().has_kind(|k| matches!(k, ErrorKind::KeyNotFound(_))));
    assert_eq!(c.require_index_of(40).unwrap(), &Key::Int(43));
    assert!(
        c.require_index_of(41)
            .unwrap_err()
            .has_kind(|k| matches!(k, ErrorKind::ElementNotFound(_)))
    );
}

// =============================================================================
// Callbacks
// =============================================================================

#[test]
fn callback_returning_42_is_rejected_where_bool_is_required() {
    let err = scenario().find(|_, _| 42).unwrap_err();
    let report = err.report();
    assert!(err.has_kind(|k| matches!(
        k,
        ErrorKind::InvalidClosureReturnValue { actual, .. } if actual == "42"
    )));
    assert!(report.contains("failure in find"), "{report}");
}

#[test]
fn each_cannot_short_circuit() {
    let mut seen = 0;
    scenario().each(|_, _| {
        seen += 1;
        false
    })
    .unwrap();
    assert_eq!(seen, 4);
}

#[test]
fn each_carries_state() {
    let mut total = 0;
    scenario()
        .each_with(&mut total, |v, _, total| *total += v.as_int().unwrap_or(0))
        .unwrap();
    assert_eq!(total, 100);
}

#[test]
fn callback_errors_keep_key_and_value() {
    let err = scenario()
        .each(|v, _| {
            if v.as_int() == Some(40) {
                Err(Error::invalid_argument("forty"))
            } else {
                Ok(())
            }
        })
        .unwrap_err();
    let report = err.report();
    assert!(report.contains("key 43"), "{report}");
    assert!(report.contains("value 40"), "{report}");
    assert!(report.ends_with("invalid argument: forty"), "{report}");
}

#[test]
fn every_with_carry_stops_early() {
    let mut visited = Vec::new();
    let completed = scenario()
        .every_with(&mut visited, |_, k, visited| {
            visited.push(k.clone());
            visited.len() < 2
        })
        .unwrap();
    assert!(!completed);
    assert_eq!(visited, vec![Key::Int(0), Key::from("foo")]);
}

#[test]
fn every_treats_nil_as_continue() {
    assert!(scenario().every(|_, _| None::<bool>).unwrap());
    assert!(scenario().every(|_, _| 1).is_err());
}

// =============================================================================
// Ranking
// =============================================================================

#[test]
fn max_and_min_by_length() {
    let c = StringCollection::from_values(["bb", "a", "ccc", "dd"]).unwrap();
    let len = |v: &Value, _: &Key| v.as_str().map_or(0, str::len) as i64;
    assert_eq!(c.max_by(len).unwrap(), Some(&Value::from("ccc")));
    assert_eq!(c.min_by(len).unwrap(), Some(&Value::from("a")));
}

#[test]
fn ties_prefer_later_for_max_and_earlier_for_min() {
    let c = StringCollection::from_values(["x1", "y1", "x2", "y2"]).unwrap();
    let flat = |_: &Value, _: &Key| 0;
    assert_eq!(c.max_by(flat).unwrap(), Some(&Value::from("y2")));
    assert_eq!(c.min_by(flat).unwrap(), Some(&Value::from("x1")));
}

#[test]
fn empty_ranking_is_absent() {
    let c = StringCollection::empty().unwrap();
    assert_eq!(c.max_by(|_, _| 1).unwrap(), None);
    assert_eq!(c.min_by(|_, _| 1).unwrap(), None);
}

// =============================================================================
// Traversal and Export
// =============================================================================

#[test]
fn cursor_does_not_affect_contents() {
    let c = scenario();
    let mut cursor = c.cursor();
    cursor.next();
    cursor.next();
    assert_eq!(cursor.key(), Some(&Key::Int(42)));
    assert_eq!(c.count(), 4);
    assert_eq!(c.first(), Some(&Value::Int(10)));
    assert_eq!(c.last(), Some(&Value::Int(40)));
}

#[test]
fn iteration_matches_to_array() {
    let c = scenario();
    let iterated: Vec<_> = (&c).into_iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    assert_eq!(iterated, c.to_array());
}
