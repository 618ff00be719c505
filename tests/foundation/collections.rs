//! Integration tests for OrderedMap
//!
//! Tests insertion order, key assignment and structural sharing.

use gated_foundation::{ErrorKind, Key, OrderedMap};

fn keys<V: Clone>(map: &OrderedMap<V>) -> Vec<Key> {
    map.keys().cloned().collect()
}

// =============================================================================
// Key Assignment
// =============================================================================

#[test]
fn append_continues_after_greatest_int_key() {
    let mut map = OrderedMap::new();
    map.set(Key::Int(5), "a");
    map.set(Key::from("s"), "b");
    map.set(Key::Int(2), "c");
    assert_eq!(map.append("d").unwrap(), Key::Int(6));
}

#[test]
fn negative_keys_leave_append_at_zero() {
    let mut map = OrderedMap::new();
    map.set(Key::Int(-3), 1);
    assert_eq!(map.append(2).unwrap(), Key::Int(0));
}

#[test]
fn delete_keeps_append_position() {
    let mut map = OrderedMap::new();
    map.append(1).unwrap();
    map.append(2).unwrap();
    map.delete(&Key::Int(1));
    assert_eq!(map.append(3).unwrap(), Key::Int(2));
    assert_eq!(keys(&map), vec![Key::Int(0), Key::Int(2)]);
}

#[test]
fn append_fails_once_last_int_key_is_taken() {
    let mut map = OrderedMap::new();
    map.set(Key::Int(i64::MAX - 1), "a");
    assert_eq!(map.append("b").unwrap(), Key::Int(i64::MAX));

    let err = map.append("c").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NextKeyOccupied(_)));
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&Key::Int(i64::MAX)), Some(&"b"));
}

// =============================================================================
// Ordering and Sharing
// =============================================================================

#[test]
fn overwrite_keeps_position() {
    let mut map = OrderedMap::new();
    map.set(Key::from("a"), 1);
    map.set(Key::from("b"), 2);
    map.set(Key::from("a"), 3);
    assert_eq!(keys(&map), vec![Key::from("a"), Key::from("b")]);
    assert_eq!(map.get(&Key::from("a")), Some(&3));
}

#[test]
fn clones_are_independent() {
    let original = OrderedMap::sequential(0..1000);
    let mut copy = original.clone();
    copy.delete(&Key::Int(10));
    copy.append(-1).unwrap();

    assert_eq!(original.len(), 1000);
    assert_eq!(original.get(&Key::Int(10)), Some(&10));
    assert_eq!(copy.len(), 1000);
    assert!(!copy.contains_key(&Key::Int(10)));
}

#[test]
fn persistent_operations_leave_receiver_unchanged() {
    let base = OrderedMap::sequential(["x", "y"]);
    let grown = base.insert(Key::from("z"), "z");
    let shrunk = base.remove(&Key::Int(0));

    assert_eq!(base.len(), 2);
    assert_eq!(grown.len(), 3);
    assert_eq!(shrunk.len(), 1);
}

#[test]
fn equality_is_order_sensitive() {
    let a: OrderedMap<i32> = [(Key::Int(0), 1), (Key::Int(1), 2)].into_iter().collect();
    let b: OrderedMap<i32> = [(Key::Int(1), 2), (Key::Int(0), 1)].into_iter().collect();
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
}

#[test]
fn iterates_both_ways() {
    let map = OrderedMap::sequential(['a', 'b', 'c']);
    let forward: Vec<_> = map.values().copied().collect();
    let backward: Vec<_> = map.values().rev().copied().collect();
    assert_eq!(forward, vec!['a', 'b', 'c']);
    assert_eq!(backward, vec!['c', 'b', 'a']);
    assert_eq!(map.position(&Key::Int(1)), Some(1));
}
