#![cfg(test)]

// Property tests for ChainTable kept inside the crate so they can call the
// structural invariant checker.

use crate::cursor::Cursor;
use crate::table::ChainTable;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::cell::Cell;
use std::collections::hash_map::RandomState;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations: indices shrink to earlier keys, pool length
// shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    InsertWith(usize, i32),
    EraseKey(usize),
    EraseFirst(usize),
    Find(usize),
    Contains(String),
    Mutate(usize, i32),
    Reserve(usize),
    ShrinkToFit,
    Merge(Vec<(usize, i32)>),
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>(), any::<bool>()).prop_map(|(i, v, lazy)| {
                if lazy { OpI::InsertWith(i, v) } else { OpI::Insert(i, v) }
            }),
            idx.clone().prop_map(OpI::EraseKey),
            idx.clone().prop_map(OpI::EraseFirst),
            idx.clone().prop_map(OpI::Find),
            prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            (0usize..300).prop_map(OpI::Reserve),
            Just(OpI::ShrinkToFit),
            proptest::collection::vec((idx.clone(), any::<i32>()), 0..6).prop_map(OpI::Merge),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Constant hasher: every key lands in one chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

fn check_order<S, const M: bool>(sut: &ChainTable<Key, i32, S, M>) -> Result<(), TestCaseError> {
    let forward: Vec<_> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
    let mut backward: Vec<_> = sut.iter().rev().map(|(k, v)| (k.clone(), *v)).collect();
    backward.reverse();
    prop_assert_eq!(forward.len(), sut.len());
    prop_assert_eq!(forward, backward);
    Ok(())
}

// Unique table vs std::collections::HashMap.
// - Duplicate inserts return the end cursor and leave the value alone.
// - Cursors of live entries keep resolving to their key across rehashes.
// - Erased cursors never resolve again.
// - Structural invariants hold after every operation.
fn run_unique<S>(
    sut: &mut ChainTable<Key, i32, S, false>,
    pool: &[String],
    ops: Vec<OpI>,
    fresh: impl Fn() -> ChainTable<Key, i32, S, false>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model: HashMap<Key, i32> = HashMap::new();
    let mut live: HashMap<Key, Cursor> = HashMap::new();
    let mut stale: Vec<Cursor> = Vec::new();
    let calls = Cell::new(0);

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key_from(pool, i);
                let already = model.contains_key(&k);
                let c = sut.insert(k.clone(), v);
                prop_assert_eq!(c.is_end(), already);
                if !already {
                    live.insert(k.clone(), c);
                    model.insert(k, v);
                }
            }
            OpI::InsertWith(i, v) => {
                let k = key_from(pool, i);
                let already = model.contains_key(&k);
                let before = calls.get();
                let c = sut.insert_with(k.clone(), || {
                    calls.set(calls.get() + 1);
                    v
                });
                prop_assert_eq!(calls.get(), before + usize::from(!already));
                if !already {
                    live.insert(k.clone(), c);
                    model.insert(k, v);
                }
            }
            OpI::EraseKey(i) => {
                let k = key_from(pool, i);
                let expected = usize::from(model.remove(&k).is_some());
                prop_assert_eq!(sut.erase_equal(&k), expected);
                if let Some(c) = live.remove(&k) {
                    stale.push(c);
                }
            }
            OpI::EraseFirst(i) => {
                let k = key_from(pool, i);
                let c = sut.find(&k);
                match sut.remove(c) {
                    Some((kk, vv)) => {
                        prop_assert!(kk == k);
                        prop_assert_eq!(Some(vv), model.remove(&k));
                        stale.extend(live.remove(&k));
                    }
                    None => prop_assert!(!model.contains_key(&k)),
                }
            }
            OpI::Find(i) => {
                let k = key_from(pool, i);
                let c = sut.find(&k);
                prop_assert_eq!(c.is_end(), !model.contains_key(&k));
                if let Some(&lc) = live.get(&k) {
                    prop_assert_eq!(c, lc);
                }
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains(s.as_str()), model.keys().any(|k| k.0 == s));
            }
            OpI::Mutate(i, d) => {
                let k = key_from(pool, i);
                if let Some(&c) = live.get(&k) {
                    let Some(v) = sut.value_mut(c) else {
                        return Err(TestCaseError::fail("live cursor should resolve"));
                    };
                    *v = v.saturating_add(d);
                    if let Some(mv) = model.get_mut(&k) {
                        *mv = mv.saturating_add(d);
                    }
                }
            }
            OpI::Reserve(n) => {
                let before = sut.bucket_count();
                sut.reserve(n);
                prop_assert!(sut.bucket_count() >= before);
            }
            OpI::ShrinkToFit => sut.shrink_to_fit(),
            OpI::Merge(entries) => {
                let mut other = fresh();
                for (i, v) in entries {
                    other.insert(key_from(pool, i), v);
                }
                for (k, v) in other.iter() {
                    model.entry(k.clone()).or_insert(*v);
                }
                sut.merge(&mut other);
                prop_assert!(other.is_empty());
                // Merged nodes get new handles; re-track them.
                for k in model.keys() {
                    live.insert(k.clone(), sut.find(k));
                }
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<_> = sut.keys().cloned().collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
                check_order(sut)?;
            }
        }

        sut.assert_invariants();
        for &c in &stale {
            prop_assert!(sut.entry(c).is_none());
        }
        for (k, &c) in &live {
            prop_assert_eq!(sut.entry(c), model.get_key_value(k));
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

// Multi table vs a map of newest-first value lists.
// - count/equal_range match the model run, newest first.
// - erase_equal reports the whole run length.
fn run_multi<S>(
    sut: &mut ChainTable<Key, i32, S, true>,
    pool: &[String],
    ops: Vec<OpI>,
    fresh: impl Fn() -> ChainTable<Key, i32, S, true>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model: HashMap<Key, Vec<i32>> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) | OpI::InsertWith(i, v) => {
                let k = key_from(pool, i);
                let c = sut.insert(k.clone(), v);
                prop_assert_eq!(sut.value(c), Some(&v));
                model.entry(k).or_default().insert(0, v);
            }
            OpI::EraseKey(i) => {
                let k = key_from(pool, i);
                let expected = model.remove(&k).map_or(0, |vs| vs.len());
                prop_assert_eq!(sut.erase_equal(&k), expected);
            }
            OpI::EraseFirst(i) => {
                let k = key_from(pool, i);
                let c = sut.find(&k);
                let removed = sut.remove(c).map(|(_, v)| v);
                let expected = match model.get_mut(&k) {
                    Some(vs) => {
                        let v = vs.remove(0);
                        if vs.is_empty() {
                            model.remove(&k);
                        }
                        Some(v)
                    }
                    None => None,
                };
                prop_assert_eq!(removed, expected);
            }
            OpI::Find(i) | OpI::Mutate(i, _) => {
                let k = key_from(pool, i);
                let run: Vec<i32> = sut.equal_range_iter(&k).map(|(_, v)| *v).collect();
                let expected = model.get(&k).cloned().unwrap_or_default();
                prop_assert_eq!(sut.count(&k), expected.len());
                prop_assert_eq!(run, expected);
                let (first, last) = sut.equal_range(&k);
                prop_assert_eq!(first.is_end(), last.is_end());
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains(s.as_str()), model.keys().any(|k| k.0 == s));
            }
            OpI::Reserve(n) => sut.reserve(n),
            OpI::ShrinkToFit => sut.shrink_to_fit(),
            OpI::Merge(entries) => {
                let mut other = fresh();
                for (i, v) in entries {
                    other.insert(key_from(pool, i), v);
                }
                for (k, v) in other.iter() {
                    model.entry(k.clone()).or_default().insert(0, *v);
                }
                sut.merge(&mut other);
                prop_assert!(other.is_empty());
            }
            OpI::Iterate => check_order(sut)?,
        }

        sut.assert_invariants();
        prop_assert_eq!(sut.len(), model.values().map(Vec::len).sum::<usize>());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_unique_state_machine((pool, ops) in arb_scenario()) {
        let mut sut = ChainTable::<Key, i32, RandomState, false>::with_bucket_count(2);
        run_unique(&mut sut, &pool, ops, || ChainTable::with_bucket_count(3))?;
    }

    #[test]
    fn prop_unique_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let mut sut = ChainTable::<Key, i32, _, false>::with_hasher(ConstBuildHasher);
        run_unique(&mut sut, &pool, ops, || ChainTable::with_hasher(ConstBuildHasher))?;
    }

    #[test]
    fn prop_multi_state_machine((pool, ops) in arb_scenario()) {
        let mut sut = ChainTable::<Key, i32, RandomState, true>::with_bucket_count(2);
        run_multi(&mut sut, &pool, ops, || ChainTable::with_bucket_count(5))?;
    }

    #[test]
    fn prop_multi_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let mut sut = ChainTable::<Key, i32, _, true>::with_hasher(ConstBuildHasher);
        run_multi(&mut sut, &pool, ops, || ChainTable::with_hasher(ConstBuildHasher))?;
    }
}
