//! Shared surface of the container wrappers.
//!
//! Each wrapper is a newtype over one `ChainTable` instantiation with a
//! `table` field. The operations that do not depend on node shape or on
//! unique/multi insertion are generated here; insertion and iteration are
//! written per wrapper.

macro_rules! forward_table_api {
    ($name:ident<$($g:ident),*>, value = $v:ty, multi = $m:literal) => {
        impl<$($g),*> $name<$($g,)* std::collections::hash_map::RandomState>
        where
            K: Eq + core::hash::Hash,
        {
            pub fn new() -> Self {
                Self { table: $crate::table::ChainTable::new() }
            }

            pub fn with_bucket_count(bucket_count: usize) -> Self {
                Self { table: $crate::table::ChainTable::with_bucket_count(bucket_count) }
            }
        }

        impl<$($g,)* S> Default for $name<$($g,)* S>
        where
            K: Eq + core::hash::Hash,
            S: core::hash::BuildHasher + Default,
        {
            fn default() -> Self {
                Self { table: Default::default() }
            }
        }

        impl<$($g,)* S> $name<$($g,)* S> {
            pub fn len(&self) -> usize {
                self.table.len()
            }

            pub fn is_empty(&self) -> bool {
                self.table.is_empty()
            }

            pub fn bucket_count(&self) -> usize {
                self.table.bucket_count()
            }

            pub fn bucket_len(&self, index: usize) -> usize {
                self.table.bucket_len(index)
            }

            pub fn load_factor(&self) -> f32 {
                self.table.load_factor()
            }

            pub fn max_load_factor(&self) -> f32 {
                self.table.max_load_factor()
            }

            pub fn gain_factor(&self) -> f32 {
                self.table.gain_factor()
            }

            pub fn hasher(&self) -> &S {
                self.table.hasher()
            }

            pub fn begin(&self) -> $crate::Cursor {
                self.table.begin()
            }

            pub fn back(&self) -> $crate::Cursor {
                self.table.back()
            }

            pub fn before_begin(&self) -> $crate::Cursor {
                self.table.before_begin()
            }

            pub fn end(&self) -> $crate::Cursor {
                self.table.end()
            }

            pub fn key(&self, cursor: $crate::Cursor) -> Option<&K> {
                self.table.key(cursor)
            }

            pub fn erase(&mut self, cursor: $crate::Cursor) -> usize {
                self.table.erase(cursor)
            }

            pub fn erase_range(&mut self, first: $crate::Cursor, last: $crate::Cursor) -> usize {
                self.table.erase_range(first, last)
            }

            pub fn clear(&mut self) {
                self.table.clear()
            }

            pub fn swap(&mut self, other: &mut Self) {
                self.table.swap(&mut other.table)
            }

            pub fn set_max_load_factor(&mut self, f: f32) -> Result<(), $crate::ConfigError> {
                self.table.set_max_load_factor(f)
            }

            pub fn set_gain_factor(&mut self, f: f32) -> Result<(), $crate::ConfigError> {
                self.table.set_gain_factor(f)
            }

            pub fn reserve(&mut self, count: usize) {
                self.table.reserve(count)
            }

            pub fn set_bucket_count(&mut self, n: usize) -> Result<(), $crate::ConfigError> {
                self.table.set_bucket_count(n)
            }

            pub fn shrink_to_fit(&mut self) {
                self.table.shrink_to_fit()
            }

            /// The underlying engine, for introspection.
            pub fn as_table(&self) -> &$crate::table::ChainTable<K, $v, S, $m> {
                &self.table
            }
        }

        impl<$($g,)* S> $name<$($g,)* S>
        where
            K: Eq + core::hash::Hash,
            S: core::hash::BuildHasher,
        {
            pub fn with_hasher(hasher: S) -> Self {
                Self { table: $crate::table::ChainTable::with_hasher(hasher) }
            }

            pub fn with_bucket_count_and_hasher(bucket_count: usize, hasher: S) -> Self {
                Self {
                    table: $crate::table::ChainTable::with_bucket_count_and_hasher(
                        bucket_count,
                        hasher,
                    ),
                }
            }

            pub fn try_with_config(
                config: $crate::TableConfig,
                hasher: S,
            ) -> Result<Self, $crate::ConfigError> {
                Ok(Self { table: $crate::table::ChainTable::try_with_config(config, hasher)? })
            }

            pub fn find<Q>(&self, q: &Q) -> $crate::Cursor
            where
                K: core::borrow::Borrow<Q>,
                Q: ?Sized + core::hash::Hash + Eq,
            {
                self.table.find(q)
            }

            pub fn contains<Q>(&self, q: &Q) -> bool
            where
                K: core::borrow::Borrow<Q>,
                Q: ?Sized + core::hash::Hash + Eq,
            {
                self.table.contains(q)
            }

            pub fn bucket_index<Q>(&self, q: &Q) -> usize
            where
                K: core::borrow::Borrow<Q>,
                Q: ?Sized + core::hash::Hash + Eq,
            {
                self.table.bucket_index(q)
            }

            pub fn count<Q>(&self, q: &Q) -> usize
            where
                K: core::borrow::Borrow<Q>,
                Q: ?Sized + core::hash::Hash + Eq,
            {
                self.table.count(q)
            }

            /// Inclusive cursor pair over the entries equal to `q`.
            pub fn equal_range<Q>(&self, q: &Q) -> ($crate::Cursor, $crate::Cursor)
            where
                K: core::borrow::Borrow<Q>,
                Q: ?Sized + core::hash::Hash + Eq,
            {
                self.table.equal_range(q)
            }

            /// Erase every entry equal to `q`; returns how many were erased.
            pub fn erase_key<Q>(&mut self, q: &Q) -> usize
            where
                K: core::borrow::Borrow<Q>,
                Q: ?Sized + core::hash::Hash + Eq,
            {
                self.table.erase_equal(q)
            }

            /// Move all entries of `other` into `self`; `other` ends empty.
            pub fn merge(&mut self, other: &mut Self) {
                self.table.merge(&mut other.table)
            }
        }

        impl<$($g,)* S> $crate::Traverse for $name<$($g,)* S> {
            type Key = K;
            type Value = $v;

            fn table_id(&self) -> $crate::TableId {
                $crate::Traverse::table_id(&self.table)
            }

            fn begin_position(&self) -> $crate::Position {
                $crate::Traverse::begin_position(&self.table)
            }

            fn back_position(&self) -> $crate::Position {
                $crate::Traverse::back_position(&self.table)
            }

            fn to_next(&self, pos: &mut $crate::Position) {
                $crate::Traverse::to_next(&self.table, pos)
            }

            fn to_prev(&self, pos: &mut $crate::Position) {
                $crate::Traverse::to_prev(&self.table, pos)
            }

            fn entry_at(&self, pos: $crate::Position) -> Option<(&K, &$v)> {
                $crate::Traverse::entry_at(&self.table, pos)
            }
        }
    };
}

pub(crate) use forward_table_api;
