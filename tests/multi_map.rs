// HashMultiMap behaviour: repeated keys, newest-first runs, run erasure.
use chained_hash_table::HashMultiMap;

#[test]
fn repeated_keys_form_newest_first_run() {
    let mut m = HashMultiMap::new();
    m.insert("k", 1);
    m.insert("other", 0);
    m.insert("k", 2);
    m.insert("k", 3);
    assert_eq!(m.len(), 4);
    assert_eq!(m.count("k"), 3);
    assert_eq!(m.get("k"), Some(&3));
    let run: Vec<i32> = m.get_all("k").map(|(_, v)| *v).collect();
    assert_eq!(run, vec![3, 2, 1]);
}

#[test]
fn equal_range_cursors_bound_the_run() {
    let mut m = HashMultiMap::new();
    for v in 0..4 {
        m.insert(9u32, v);
    }
    m.insert(10u32, 99);
    let (first, last) = m.equal_range(&9);
    assert_eq!(m.value(first), Some(&3));
    assert_eq!(m.value(last), Some(&0));

    let mut c = first;
    let mut seen = vec![*m.value(c).unwrap()];
    while c != last {
        assert!(c.move_next(&m));
        seen.push(*m.value(c).unwrap());
    }
    assert_eq!(seen, vec![3, 2, 1, 0]);

    let (a, b) = m.equal_range(&11);
    assert!(a.is_end() && b.is_end());
}

#[test]
fn runs_survive_rehash_in_order() {
    let mut m = HashMultiMap::new();
    for v in 0..5 {
        m.insert(0u64, v);
    }
    // Force several growths.
    for k in 1..500u64 {
        m.insert(k, 0);
    }
    assert!(m.bucket_count() > 50);
    let run: Vec<i32> = m.get_all(&0).map(|(_, v)| *v).collect();
    assert_eq!(run, vec![4, 3, 2, 1, 0]);
}

#[test]
fn erase_key_removes_whole_run() {
    let mut m = HashMultiMap::new();
    m.insert('a', 1);
    m.insert('a', 2);
    m.insert('b', 3);
    assert_eq!(m.erase_key(&'a'), 2);
    assert_eq!(m.erase_key(&'a'), 0);
    assert_eq!(m.len(), 1);
    assert_eq!(m.remove_at(m.find(&'b')), Some(('b', 3)));
    assert!(m.is_empty());
}

#[test]
fn merge_relocates_everything() {
    let mut a = HashMultiMap::new();
    let mut b = HashMultiMap::new();
    a.insert(1, "a");
    b.insert(1, "b1");
    b.insert(1, "b2");
    b.insert(2, "c");
    a.merge(&mut b);
    assert_eq!(a.len(), 4);
    assert_eq!(a.count(&1), 3);
    assert!(b.is_empty());
}
