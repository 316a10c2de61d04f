//! Key-value containers: `HashMap` (unique keys) and `HashMultiMap`.

use crate::adaptor::forward_table_api;
use crate::cursor::Cursor;
use crate::error::InsertError;
use crate::iter::{EqualRangeIter, IntoIter, Iter, Keys, Values};
use crate::table::ChainTable;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// Map with unique keys, iterated in bucket order.
///
/// ```
/// use chained_hash_table::HashMap;
///
/// let mut m = HashMap::new();
/// assert!(m.insert(1, "a").is_node());
/// assert!(m.insert(1, "c").is_end());
/// assert_eq!(m.get(&1), Some(&"a"));
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = RandomState> {
    table: ChainTable<K, V, S, false>,
}

forward_table_api!(HashMap<K, V>, value = V, multi = false);

/// Map allowing repeated keys; entries with equal keys stay adjacent,
/// most recently inserted first.
#[derive(Clone)]
pub struct HashMultiMap<K, V, S = RandomState> {
    table: ChainTable<K, V, S, true>,
}

forward_table_api!(HashMultiMap<K, V>, value = V, multi = true);

macro_rules! map_accessors {
    ($name:ident, $m:literal) => {
        impl<K, V, S> $name<K, V, S> {
            pub fn value(&self, cursor: Cursor) -> Option<&V> {
                self.table.value(cursor)
            }

            pub fn value_mut(&mut self, cursor: Cursor) -> Option<&mut V> {
                self.table.value_mut(cursor)
            }

            pub fn entry(&self, cursor: Cursor) -> Option<(&K, &V)> {
                self.table.entry(cursor)
            }

            /// Remove the entry under `cursor`, returning it.
            pub fn remove_at(&mut self, cursor: Cursor) -> Option<(K, V)> {
                self.table.remove(cursor)
            }

            pub fn iter(&self) -> Iter<'_, K, V, S, $m> {
                self.table.iter()
            }

            pub fn keys(&self) -> Keys<'_, K, V, S, $m> {
                self.table.keys()
            }

            pub fn values(&self) -> Values<'_, K, V, S, $m> {
                self.table.values()
            }

            pub fn for_each_mut<F>(&mut self, f: F)
            where
                F: FnMut(&K, &mut V),
            {
                self.table.for_each_mut(f)
            }
        }

        impl<K, V, S> fmt::Debug for $name<K, V, S>
        where
            K: fmt::Debug,
            V: fmt::Debug,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map().entries(self.iter()).finish()
            }
        }

        impl<K, V, S> Extend<(K, V)> for $name<K, V, S>
        where
            K: Eq + Hash,
            S: BuildHasher,
        {
            fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
                self.table.extend(iter)
            }
        }

        impl<K, V, S> FromIterator<(K, V)> for $name<K, V, S>
        where
            K: Eq + Hash,
            S: BuildHasher + Default,
        {
            fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                Self {
                    table: ChainTable::from_iter(iter),
                }
            }
        }

        impl<K, V, S> IntoIterator for $name<K, V, S> {
            type Item = (K, V);
            type IntoIter = IntoIter<K, V>;

            fn into_iter(self) -> Self::IntoIter {
                self.table.into_iter()
            }
        }

        impl<'a, K, V, S> IntoIterator for &'a $name<K, V, S> {
            type Item = (&'a K, &'a V);
            type IntoIter = Iter<'a, K, V, S, $m>;

            fn into_iter(self) -> Self::IntoIter {
                self.table.iter()
            }
        }

        impl<K, V, S> $name<K, V, S>
        where
            K: Eq + Hash,
            S: BuildHasher,
        {
            /// Mutable access to the first entry with key `q`.
            pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
            where
                K: Borrow<Q>,
                Q: ?Sized + Hash + Eq,
            {
                self.table.get_mut(q)
            }

            pub fn insert_with<F>(&mut self, key: K, make: F) -> Cursor
            where
                F: FnOnce() -> V,
            {
                self.table.insert_with(key, make)
            }
        }
    };
}

map_accessors!(HashMap, false);
map_accessors!(HashMultiMap, true);

impl<K, V, S> HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Insert a new entry; the end cursor means `key` was already present
    /// and nothing changed.
    pub fn insert(&mut self, key: K, value: V) -> Cursor {
        self.table.insert(key, value)
    }

    pub fn try_insert(&mut self, key: K, value: V) -> Result<Cursor, InsertError> {
        self.table.try_insert(key, value)
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get(q)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get_key_value(q)
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let cursor = self.table.find(q);
        self.table.remove(cursor).map(|(_, v)| v)
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> HashMultiMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Always inserts. A repeated key is placed in front of its existing run.
    pub fn insert(&mut self, key: K, value: V) -> Cursor {
        self.table.insert(key, value)
    }

    /// The most recently inserted value for `q`.
    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get(q)
    }

    /// Every entry with key `q`, newest first.
    pub fn get_all<Q>(&self, q: &Q) -> EqualRangeIter<'_, K, V, S, true>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.equal_range_iter(q)
    }
}
