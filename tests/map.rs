// HashMap (unique keys) behaviour through the public API.
//
// Invariants exercised:
// - Uniqueness: a duplicate insert returns the end cursor and changes nothing.
// - Lookup parity: find/get/contains agree, including borrowed lookups.
// - Whole-table operations (merge, swap, clone, into_iter) keep contents.
use chained_hash_table::{ConfigError, HashMap, HashMultiMap, InsertError, TableConfig};
use static_assertions::assert_not_impl_any;
use std::collections::hash_map::RandomState;

// Single-threaded containers, whatever the build profile.
assert_not_impl_any!(HashMap<u32, u32>: Send, Sync);
assert_not_impl_any!(HashMultiMap<u32, u32>: Send, Sync);

// Test: duplicate key on a unique map.
// Verifies: third insert reports end, size stays 2, first value wins.
#[test]
fn duplicate_insert_returns_end() {
    let mut m = HashMap::new();
    assert!(m.insert(1, "a").is_node());
    assert!(m.insert(2, "b").is_node());
    let third = m.insert(1, "c");
    assert!(third.is_end());
    assert_eq!(third, m.end());
    assert_eq!(m.len(), 2);
    assert_eq!(m.get(&1), Some(&"a"));
    assert_eq!(m.value(m.find(&1)), Some(&"a"));
}

#[test]
fn try_insert_reports_duplicate() {
    let mut m = HashMap::new();
    let c = m.try_insert("k".to_string(), 1).expect("fresh key");
    assert_eq!(m.key(c).map(String::as_str), Some("k"));
    assert_eq!(m.try_insert("k".to_string(), 2), Err(InsertError::DuplicateKey));
    assert_eq!(InsertError::DuplicateKey.to_string(), "key is already present in the table");
}

// Test: borrowed lookups (store String, query with &str).
#[test]
fn borrowed_lookup_with_str() {
    let mut m: HashMap<String, i32> = HashMap::new();
    m.insert("hello".to_string(), 1);
    assert!(m.contains("hello"));
    assert!(!m.contains("world"));
    assert!(m.find("hello").is_node());
    assert!(m.find("world").is_end());
    assert_eq!(m.get_key_value("hello"), Some((&"hello".to_string(), &1)));
}

#[test]
fn get_mut_and_value_mut_update_in_place() {
    let mut m = HashMap::new();
    let c = m.insert("k", 10);
    *m.get_mut("k").unwrap() += 5;
    assert_eq!(m.value(c), Some(&15));
    *m.value_mut(c).unwrap() = 30;
    assert_eq!(m.get("k"), Some(&30));
    m.for_each_mut(|_, v| *v *= 2);
    assert_eq!(m.get("k"), Some(&60));
}

#[test]
fn remove_returns_value_and_invalidates_cursor() {
    let mut m = HashMap::new();
    let c = m.insert(7, "seven");
    assert_eq!(m.remove(&7), Some("seven"));
    assert_eq!(m.remove(&7), None);
    assert!(m.value(c).is_none());
    assert_eq!(m.erase_key(&7), 0);
    assert!(m.is_empty());
}

#[test]
fn insert_with_skips_builder_on_duplicate() {
    let mut m = HashMap::new();
    let mut built = 0;
    m.insert_with(1, || {
        built += 1;
        "x"
    });
    let c = m.insert_with(1, || {
        built += 1;
        "y"
    });
    assert!(c.is_end());
    assert_eq!(built, 1);
}

#[test]
fn merge_keeps_existing_and_empties_source() {
    let mut a: HashMap<u32, &str> = [(1, "a1"), (2, "a2")].into_iter().collect();
    let mut b: HashMap<u32, &str> = [(2, "b2"), (3, "b3")].into_iter().collect();
    a.merge(&mut b);
    assert_eq!(a.len(), 3);
    assert_eq!(a.get(&2), Some(&"a2"));
    assert_eq!(a.get(&3), Some(&"b3"));
    assert!(b.is_empty());
    assert_eq!(b.begin(), b.end());
    assert_eq!(b.back(), b.end());
}

#[test]
fn swap_exchanges_contents_and_cursors_follow() {
    let mut a = HashMap::new();
    let mut b = HashMap::new();
    let ca = a.insert("a", 1);
    b.insert("b", 2);
    b.insert("bb", 3);
    a.swap(&mut b);
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 1);
    assert_eq!(b.value(ca), Some(&1));
    assert!(a.value(ca).is_none());
}

#[test]
fn clone_and_equality() {
    let mut m = HashMap::new();
    m.extend((0..20).map(|i| (i, i * 10)));
    let copy = m.clone();
    assert_eq!(copy, m);
    let c = m.find(&3);
    assert!(copy.value(c).is_none(), "cursors do not carry over to clones");
    let mut other = copy.clone();
    other.remove(&3);
    assert_ne!(other, m);
}

#[test]
fn into_iter_matches_iter_order() {
    let m: HashMap<u64, u64> = (0..100).map(|i| (i, i + 1)).collect();
    let borrowed: Vec<(u64, u64)> = m.iter().map(|(k, v)| (*k, *v)).collect();
    let owned: Vec<(u64, u64)> = m.into_iter().collect();
    assert_eq!(owned, borrowed);
}

#[test]
fn debug_lists_entries() {
    let mut m = HashMap::new();
    m.insert("only", 1);
    assert_eq!(format!("{:?}", m), r#"{"only": 1}"#);
}

#[test]
fn configuration_is_validated() {
    let cfg = TableConfig::default().with_bucket_count(4).with_max_load_factor(1.5);
    let mut m: HashMap<u8, u8> = HashMap::try_with_config(cfg, RandomState::new()).unwrap();
    assert_eq!(m.bucket_count(), 4);
    assert_eq!(m.max_load_factor(), 1.5);
    for i in 0..6 {
        m.insert(i, i);
    }
    assert_eq!(m.bucket_count(), 4);
    m.insert(6, 6);
    assert_eq!(m.bucket_count(), 8);

    let bad = TableConfig::default().with_gain_factor(1.0);
    assert!(matches!(
        HashMap::<u8, u8>::try_with_config(bad, RandomState::new()),
        Err(ConfigError::InvalidGainFactor(_))
    ));
    assert_eq!(HashMap::<u8, u8>::with_bucket_count(0).bucket_count(), 1);
}
