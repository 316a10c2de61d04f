//! Key-only containers: `HashSet` (unique keys) and `HashMultiSet`.

use crate::adaptor::forward_table_api;
use crate::cursor::Cursor;
use crate::error::InsertError;
use crate::iter::{IntoIter, Keys};
use crate::table::ChainTable;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// Set with unique keys, iterated in bucket order.
#[derive(Clone)]
pub struct HashSet<K, S = RandomState> {
    table: ChainTable<K, (), S, false>,
}

forward_table_api!(HashSet<K>, value = (), multi = false);

/// Set counting repeated keys; equal keys stay adjacent.
///
/// ```
/// use chained_hash_table::HashMultiSet;
///
/// let mut s = HashMultiSet::new();
/// for _ in 0..3 {
///     s.insert(5);
/// }
/// assert_eq!(s.count(&5), 3);
/// assert_eq!(s.erase_key(&5), 3);
/// assert!(s.is_empty());
/// ```
#[derive(Clone)]
pub struct HashMultiSet<K, S = RandomState> {
    table: ChainTable<K, (), S, true>,
}

forward_table_api!(HashMultiSet<K>, value = (), multi = true);

/// Owning iterator over set keys.
pub type SetIntoIter<K> = core::iter::Map<IntoIter<K, ()>, fn((K, ())) -> K>;

fn take_key<K>((k, ()): (K, ())) -> K {
    k
}

macro_rules! set_accessors {
    ($name:ident, $m:literal) => {
        impl<K, S> $name<K, S> {
            /// Remove the key under `cursor`, returning it.
            pub fn remove_at(&mut self, cursor: Cursor) -> Option<K> {
                self.table.remove(cursor).map(|(k, ())| k)
            }

            pub fn iter(&self) -> Keys<'_, K, (), S, $m> {
                self.table.keys()
            }
        }

        impl<K, S> $name<K, S>
        where
            K: Eq + Hash,
            S: BuildHasher,
        {
            pub fn insert(&mut self, key: K) -> Cursor {
                self.table.insert(key, ())
            }

            /// The stored key equal to `q`.
            pub fn get<Q>(&self, q: &Q) -> Option<&K>
            where
                K: Borrow<Q>,
                Q: ?Sized + Hash + Eq,
            {
                self.table.get_key_value(q).map(|(k, _)| k)
            }

            /// Remove one key equal to `q` and return it.
            pub fn take<Q>(&mut self, q: &Q) -> Option<K>
            where
                K: Borrow<Q>,
                Q: ?Sized + Hash + Eq,
            {
                let cursor = self.table.find(q);
                self.remove_at(cursor)
            }
        }

        impl<K, S> fmt::Debug for $name<K, S>
        where
            K: fmt::Debug,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_set().entries(self.iter()).finish()
            }
        }

        impl<K, S> Extend<K> for $name<K, S>
        where
            K: Eq + Hash,
            S: BuildHasher,
        {
            fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
                for k in iter {
                    self.insert(k);
                }
            }
        }

        impl<K, S> FromIterator<K> for $name<K, S>
        where
            K: Eq + Hash,
            S: BuildHasher + Default,
        {
            fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
                let mut s = Self::default();
                s.extend(iter);
                s
            }
        }

        impl<K, S> IntoIterator for $name<K, S> {
            type Item = K;
            type IntoIter = SetIntoIter<K>;

            fn into_iter(self) -> Self::IntoIter {
                self.table.into_iter().map(take_key as fn((K, ())) -> K)
            }
        }

        impl<'a, K, S> IntoIterator for &'a $name<K, S> {
            type Item = &'a K;
            type IntoIter = Keys<'a, K, (), S, $m>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }
    };
}

set_accessors!(HashSet, false);
set_accessors!(HashMultiSet, true);

impl<K, S> HashSet<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn try_insert(&mut self, key: K) -> Result<Cursor, InsertError> {
        self.table.try_insert(key, ())
    }

    /// Returns whether `q` was present.
    pub fn remove<Q>(&mut self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.erase_key(q) == 1
    }
}

impl<K, S> PartialEq for HashSet<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|k| other.contains(k))
    }
}

impl<K, S> Eq for HashSet<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
}
