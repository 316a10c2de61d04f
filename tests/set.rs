// HashSet behaviour and growth under the default configuration.
use chained_hash_table::{ChainTable, HashMultiSet, HashSet};
use static_assertions::assert_not_impl_any;

assert_not_impl_any!(HashSet<u32>: Send, Sync);
assert_not_impl_any!(HashMultiSet<u32>: Send, Sync);
assert_not_impl_any!(ChainTable<u32, u32>: Send, Sync);

#[test]
fn empty_set_boundaries() {
    let s: HashSet<i32> = HashSet::new();
    assert_eq!(s.begin(), s.end());
    assert_eq!(s.back(), s.end());
    assert!(s.before_begin().is_before_begin());
    assert_eq!(s.iter().count(), 0);
    assert_eq!(s.load_factor(), 0.0);
}

#[test]
fn insert_get_take_remove() {
    let mut s = HashSet::new();
    assert!(s.insert("a".to_string()).is_node());
    assert!(s.insert("a".to_string()).is_end());
    assert!(s.try_insert("a".to_string()).is_err());
    s.insert("b".to_string());
    assert_eq!(s.get("a").map(String::as_str), Some("a"));
    assert_eq!(s.take("a"), Some("a".to_string()));
    assert_eq!(s.take("a"), None);
    assert!(s.remove("b"));
    assert!(!s.remove("b"));
    assert!(s.is_empty());
}

#[test]
fn insert_then_erase_everything_restores_empty_bounds() {
    let mut s = HashSet::new();
    for i in 0..300u32 {
        s.insert(i);
    }
    assert_eq!(s.len(), 300);
    for i in 0..300u32 {
        assert!(s.remove(&i));
    }
    assert!(s.is_empty());
    assert_eq!(s.begin(), s.end());
    assert_eq!(s.back(), s.end());
}

// Test: growth with the default policy (50 buckets, max 0.7, gain 2).
// Verifies: bucket count doubles once per threshold crossing and the load
// factor never exceeds the maximum after an insert.
#[test]
fn grows_by_gain_factor_from_default() {
    let mut s = HashSet::new();
    assert_eq!(s.bucket_count(), 50);
    let mut seen = vec![s.bucket_count()];
    for i in 0..1000u32 {
        s.insert(i);
        assert!(s.load_factor() <= s.max_load_factor());
        if *seen.last().unwrap() != s.bucket_count() {
            seen.push(s.bucket_count());
        }
    }
    assert_eq!(seen, vec![50, 100, 200, 400, 800, 1600]);
    assert_eq!(s.len(), 1000);
    for i in 0..1000u32 {
        assert!(s.contains(&i));
    }
}

#[test]
fn erase_does_not_shrink_but_shrink_to_fit_does() {
    let mut s: HashSet<u32> = (0..100).collect();
    let grown = s.bucket_count();
    for i in 0..95 {
        s.remove(&i);
    }
    assert_eq!(s.bucket_count(), grown);
    s.shrink_to_fit();
    assert!(s.bucket_count() < grown);
    assert!(s.load_factor() <= s.max_load_factor());
    let left: std::collections::BTreeSet<u32> = s.iter().copied().collect();
    assert_eq!(left, (95..100).collect());
}

#[test]
fn bucket_introspection_accounts_for_every_key() {
    let s: HashSet<u32> = (0..40).collect();
    let total: usize = (0..s.bucket_count()).map(|b| s.bucket_len(b)).sum();
    assert_eq!(total, 40);
    for k in 0..40u32 {
        let b = s.bucket_index(&k);
        assert!(b < s.bucket_count());
        assert!(s.bucket_len(b) >= 1);
    }
    assert_eq!(s.bucket_len(s.bucket_count()), 0);
}

#[test]
fn equality_ignores_order() {
    let a: HashSet<u8> = [1, 2, 3].into_iter().collect();
    let mut b: HashSet<u8> = HashSet::with_bucket_count(3);
    b.extend([3, 2, 1]);
    assert_eq!(a, b);
    b.remove(&2);
    assert_ne!(a, b);
}
