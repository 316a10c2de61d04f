//! ChainTable: the separate-chaining engine shared by every container variant.
//!
//! Nodes live in a generational arena; buckets and the `prev`/`next` links
//! are arena handles. A rehash rebuilds only the bucket array and relinks
//! nodes, so handles (and the cursors carrying them) stay valid. Logical
//! order is bucket order, then chain order within a bucket.

use crate::bucket::BucketArray;
use crate::config::{self, TableConfig, DEFAULT_BUCKET_COUNT, RESERVE_MARGIN};
use crate::cursor::{Cursor, TableId, Traverse};
use crate::error::{ConfigError, InsertError};
use crate::iter::{EqualRangeIter, IntoIter, Iter, Keys, Values};
use crate::node::{Node, NodeKey, Position};
use crate::reentrancy::DebugReentrancy;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use slotmap::SlotMap;
use std::collections::hash_map::RandomState;
use tracing::{debug, trace};

/// Structural change that `restore_bounds` must account for.
enum Relink {
    /// A node was just linked into its bucket.
    Linked(NodeKey),
    /// A node was unlinked. `next` is its logical successor, present only
    /// if the node was `begin`; `prev` its predecessor, only if it was `back`.
    Unlinked {
        next: Option<Position>,
        prev: Option<Position>,
    },
    /// Every chain was rebuilt.
    Rebuilt,
    /// Every node is gone.
    Emptied,
}

#[derive(Debug, Clone, Copy)]
enum RehashReason {
    LoadFactor,
    Reserve,
    SetBucketCount,
    ShrinkToFit,
}

/// Hash table with chained buckets. `MULTI` selects whether equal keys may
/// coexist; equal keys always form one contiguous run inside a chain, newest
/// first.
pub struct ChainTable<K, V, S = RandomState, const MULTI: bool = false> {
    id: TableId,
    hasher: S,
    nodes: SlotMap<NodeKey, Node<K, V>>,
    buckets: BucketArray,
    max_load_factor: f32,
    gain_factor: f32,
    begin: Option<NodeKey>,
    back: Option<NodeKey>,
    reentrancy: DebugReentrancy,
}

pub type UniqueTable<K, V, S = RandomState> = ChainTable<K, V, S, false>;
pub type MultiTable<K, V, S = RandomState> = ChainTable<K, V, S, true>;

impl<K, V, const MULTI: bool> ChainTable<K, V, RandomState, MULTI>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    pub fn with_bucket_count(bucket_count: usize) -> Self {
        Self::with_bucket_count_and_hasher(bucket_count, RandomState::new())
    }
}

impl<K, V, S, const MULTI: bool> Default for ChainTable<K, V, S, MULTI>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S, const MULTI: bool> Clone for ChainTable<K, V, S, MULTI>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    /// Same layout, fresh identity: cursors of `self` do not apply to the clone.
    fn clone(&self) -> Self {
        Self {
            id: TableId::fresh(),
            hasher: self.hasher.clone(),
            nodes: self.nodes.clone(),
            buckets: self.buckets.clone(),
            max_load_factor: self.max_load_factor,
            gain_factor: self.gain_factor,
            begin: self.begin,
            back: self.back,
            reentrancy: DebugReentrancy::new(),
        }
    }
}

impl<K, V, S, const MULTI: bool> fmt::Debug for ChainTable<K, V, S, MULTI>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Structure-only operations: no user `Hash`/`Eq` code runs here.
impl<K, V, S, const MULTI: bool> ChainTable<K, V, S, MULTI> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_multi(&self) -> bool {
        MULTI
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f32 {
        self.nodes.len() as f32 / self.buckets.len() as f32
    }

    pub fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    pub fn gain_factor(&self) -> f32 {
        self.gain_factor
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    /// Number of nodes chained in bucket `index` (0 when out of range).
    pub fn bucket_len(&self, index: usize) -> usize {
        if index >= self.buckets.len() {
            return 0;
        }
        let mut n = 0;
        let mut cur = self.buckets.head(index);
        while let Some(k) = cur {
            n += 1;
            cur = self.nodes[k].next;
        }
        n
    }

    pub fn begin(&self) -> Cursor {
        Cursor::new(self.id, self.begin_position())
    }

    pub fn back(&self) -> Cursor {
        Cursor::new(self.id, self.back_position())
    }

    pub fn before_begin(&self) -> Cursor {
        Cursor::new(self.id, Position::BeforeBegin)
    }

    pub fn end(&self) -> Cursor {
        Cursor::new(self.id, Position::End)
    }

    pub fn key(&self, cursor: Cursor) -> Option<&K> {
        self.entry(cursor).map(|(k, _)| k)
    }

    pub fn value(&self, cursor: Cursor) -> Option<&V> {
        self.entry(cursor).map(|(_, v)| v)
    }

    pub fn entry(&self, cursor: Cursor) -> Option<(&K, &V)> {
        cursor.entry(self)
    }

    pub fn value_mut(&mut self, cursor: Cursor) -> Option<&mut V> {
        if !cursor.belongs_to(self) {
            return None;
        }
        let k = cursor.position().node()?;
        self.nodes.get_mut(k).map(|n| &mut n.value)
    }

    pub fn iter(&self) -> Iter<'_, K, V, S, MULTI> {
        Iter::new(self)
    }

    pub fn keys(&self) -> Keys<'_, K, V, S, MULTI> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V, S, MULTI> {
        Values::new(self.iter())
    }

    /// Visit every entry in bucket order with mutable access to the value.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V),
    {
        let mut pos = Position::BeforeBegin;
        loop {
            self.to_next(&mut pos);
            let Position::Node(k) = pos else { break };
            let node = &mut self.nodes[k];
            f(&node.key, &mut node.value);
        }
    }

    /// Unlink the node under `cursor` and hand back its contents. Sentinels,
    /// foreign cursors and already-erased nodes yield `None`.
    pub fn remove(&mut self, cursor: Cursor) -> Option<(K, V)> {
        if !cursor.belongs_to(self) {
            return None;
        }
        let k = cursor.position().node()?;
        if !self.nodes.contains_key(k) {
            return None;
        }
        // Neighbour lookups can scan empty buckets; only a bound needs them.
        let next = (self.begin == Some(k)).then(|| self.next_of(k));
        let prev = (self.back == Some(k)).then(|| self.prev_of(k));

        let node = self.unlink(k)?;
        self.restore_bounds(Relink::Unlinked { next, prev });
        Some((node.key, node.value))
    }

    /// Erase the node under `cursor`; returns how many nodes were erased.
    pub fn erase(&mut self, cursor: Cursor) -> usize {
        usize::from(self.remove(cursor).is_some())
    }

    /// Erase `first..=last` in logical order. Both cursors must name nodes
    /// of this table; otherwise nothing is erased. If `last` is not reached
    /// from `first`, erasure stops at the end of the table. A stale `first`
    /// erases nothing: stepping from an erased node lands on `End`.
    pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> usize {
        let named = |c: &Cursor| c.table() == self.id && c.is_node();
        if !named(&first) || !named(&last) {
            return 0;
        }
        let mut doomed = Vec::new();
        let mut pos = first.position();
        while let Position::Node(k) = pos {
            doomed.push(k);
            if pos == last.position() {
                break;
            }
            self.to_next(&mut pos);
        }
        let id = self.id;
        let mut erased = 0;
        for k in doomed {
            erased += self.erase(Cursor::new(id, Position::Node(k)));
        }
        erased
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.buckets.clear();
        self.restore_bounds(Relink::Emptied);
    }

    /// Exchange contents, configuration and identity with `other`. Cursors
    /// keep resolving against whichever table now holds their node.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    pub fn set_max_load_factor(&mut self, max_load_factor: f32) -> Result<(), ConfigError> {
        config::check_max_load_factor(max_load_factor)?;
        self.max_load_factor = max_load_factor;
        self.grow_if_needed();
        Ok(())
    }

    pub fn set_gain_factor(&mut self, gain_factor: f32) -> Result<(), ConfigError> {
        config::check_gain_factor(gain_factor)?;
        self.gain_factor = gain_factor;
        Ok(())
    }

    /// Make room for `count` elements without crossing the max load factor.
    /// Never shrinks.
    pub fn reserve(&mut self, count: usize) {
        let needed = count as f32 / self.max_load_factor;
        if needed <= self.buckets.len() as f32 {
            return;
        }
        self.rehash((needed * RESERVE_MARGIN) as usize, RehashReason::Reserve);
        self.grow_if_needed();
    }

    /// Rebucket to roughly `bucket_count` (plus the reserve margin). Refused
    /// when that many buckets would already overflow the max load factor.
    pub fn set_bucket_count(&mut self, bucket_count: usize) -> Result<(), ConfigError> {
        if bucket_count == 0 {
            return Err(ConfigError::ZeroBucketCount);
        }
        let required = self.nodes.len() as f32 / self.max_load_factor;
        if bucket_count as f32 <= required {
            return Err(ConfigError::BucketCountTooSmall {
                requested: bucket_count,
                required: required as usize,
            });
        }
        self.rehash(
            (bucket_count as f32 * RESERVE_MARGIN) as usize,
            RehashReason::SetBucketCount,
        );
        self.grow_if_needed();
        Ok(())
    }

    /// The only shrinking path: size the bucket array to the current length.
    pub fn shrink_to_fit(&mut self) {
        let target = if self.nodes.is_empty() {
            DEFAULT_BUCKET_COUNT
        } else {
            (self.nodes.len() as f32 / self.max_load_factor) as usize + 1
        };
        self.rehash(target, RehashReason::ShrinkToFit);
        self.grow_if_needed();
    }

    fn bucket_of(&self, k: NodeKey) -> usize {
        self.buckets.index_for(self.nodes[k].hash)
    }

    fn chain_tail(&self, head: NodeKey) -> NodeKey {
        let mut cur = head;
        while let Some(next) = self.nodes[cur].next {
            cur = next;
        }
        cur
    }

    fn next_of(&self, k: NodeKey) -> Position {
        if self.back == Some(k) {
            return Position::End;
        }
        let Some(node) = self.nodes.get(k) else {
            return Position::End;
        };
        if let Some(next) = node.next {
            return Position::Node(next);
        }
        let index = self.buckets.index_for(node.hash);
        self.buckets
            .first_occupied_from(index + 1)
            .map_or(Position::End, |(_, head)| Position::Node(head))
    }

    fn prev_of(&self, k: NodeKey) -> Position {
        if self.begin == Some(k) {
            return Position::BeforeBegin;
        }
        let Some(node) = self.nodes.get(k) else {
            return Position::BeforeBegin;
        };
        if let Some(prev) = node.prev {
            return Position::Node(prev);
        }
        let index = self.buckets.index_for(node.hash);
        self.buckets
            .last_occupied_before(index)
            .map_or(Position::BeforeBegin, |(_, head)| {
                Position::Node(self.chain_tail(head))
            })
    }

    fn push_front(&mut self, k: NodeKey) {
        let index = self.bucket_of(k);
        let old_head = self.buckets.head(index);
        {
            let node = &mut self.nodes[k];
            node.prev = None;
            node.next = old_head;
        }
        if let Some(h) = old_head {
            self.nodes[h].prev = Some(k);
        }
        self.buckets.set_head(index, Some(k));
    }

    /// Link `k` directly in front of `found`, which is already chained.
    fn splice_before(&mut self, found: NodeKey, k: NodeKey) {
        let prev = self.nodes[found].prev;
        {
            let node = &mut self.nodes[k];
            node.prev = prev;
            node.next = Some(found);
        }
        self.nodes[found].prev = Some(k);
        match prev {
            Some(p) => self.nodes[p].next = Some(k),
            None => {
                let index = self.bucket_of(found);
                self.buckets.set_head(index, Some(k));
            }
        }
    }

    fn unlink(&mut self, k: NodeKey) -> Option<Node<K, V>> {
        let (prev, next, hash) = {
            let n = self.nodes.get(k)?;
            (n.prev, n.next, n.hash)
        };
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => {
                let index = self.buckets.index_for(hash);
                self.buckets.set_head(index, next);
            }
        }
        if let Some(n) = next {
            self.nodes[n].prev = prev;
        }
        self.nodes.remove(k)
    }

    /// Single place where `begin`/`back` are brought back in line with the
    /// chains after a structural change.
    fn restore_bounds(&mut self, change: Relink) {
        match change {
            Relink::Linked(k) => {
                let index = self.bucket_of(k);
                let begin_index = self.begin.map(|b| self.bucket_of(b));
                if begin_index.map_or(true, |b| index <= b) {
                    // A multi splice can land mid-chain: take the head, not `k`.
                    self.begin = self.buckets.head(index);
                }
                let back_index = self.back.map(|b| self.bucket_of(b));
                if back_index.map_or(true, |b| index > b) {
                    self.back = self.buckets.head(index).map(|h| self.chain_tail(h));
                }
            }
            Relink::Unlinked { next, prev } => {
                if let Some(next) = next {
                    self.begin = next.node();
                }
                if let Some(prev) = prev {
                    self.back = prev.node();
                }
            }
            Relink::Rebuilt => {
                self.begin = self.buckets.first_occupied_from(0).map(|(_, h)| h);
                self.back = self
                    .buckets
                    .last_occupied_before(self.buckets.len())
                    .map(|(_, h)| self.chain_tail(h));
            }
            Relink::Emptied => {
                self.begin = None;
                self.back = None;
            }
        }
    }

    /// Grow by the gain factor until the load factor is back under its max.
    fn grow_if_needed(&mut self) {
        let len = self.nodes.len() as f32;
        let current = self.buckets.len();
        let mut target = current;
        while len / target as f32 > self.max_load_factor {
            let grown = (target as f32 * self.gain_factor) as usize;
            target = grown.max(target + 1);
        }
        if target != current {
            self.rehash(target, RehashReason::LoadFactor);
        }
    }

    /// Relink every node into a fresh array of `bucket_count` buckets using
    /// the stored hashes. Node handles are untouched.
    fn rehash(&mut self, bucket_count: usize, reason: RehashReason) {
        let bucket_count = bucket_count.max(1);
        let old = core::mem::replace(&mut self.buckets, BucketArray::new(bucket_count));
        debug!(
            from = old.len(),
            to = bucket_count,
            len = self.nodes.len(),
            ?reason,
            "rehash"
        );
        // Tail-first so each old chain keeps its relative order, including
        // newest-first order inside equal-key runs.
        for index in 0..old.len() {
            let Some(head) = old.head(index) else { continue };
            let mut cur = Some(self.chain_tail(head));
            while let Some(k) = cur {
                cur = self.nodes[k].prev;
                self.push_front(k);
            }
        }
        self.restore_bounds(Relink::Rebuilt);
    }

    /// Handles in logical order.
    fn ordered_keys(&self) -> Vec<NodeKey> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut pos = Position::BeforeBegin;
        loop {
            self.to_next(&mut pos);
            match pos {
                Position::Node(k) => out.push(k),
                _ => break,
            }
        }
        out
    }

    /// Empty the table, yielding entries in logical order. Bucket count and
    /// configuration are kept.
    pub(crate) fn drain_ordered(&mut self) -> Vec<(K, V)> {
        let order = self.ordered_keys();
        let drained = order
            .into_iter()
            .filter_map(|k| self.nodes.remove(k))
            .map(|n| (n.key, n.value))
            .collect();
        self.buckets.clear();
        self.restore_bounds(Relink::Emptied);
        drained
    }
}

impl<K, V, S, const MULTI: bool> ChainTable<K, V, S, MULTI>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_bucket_count_and_hasher(DEFAULT_BUCKET_COUNT, hasher)
    }

    /// A zero bucket count is raised to one.
    pub fn with_bucket_count_and_hasher(bucket_count: usize, hasher: S) -> Self {
        Self::from_parts(
            TableConfig::default().with_bucket_count(bucket_count.max(1)),
            hasher,
        )
    }

    pub fn try_with_config(config: TableConfig, hasher: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, hasher))
    }

    fn from_parts(config: TableConfig, hasher: S) -> Self {
        Self {
            id: TableId::fresh(),
            hasher,
            nodes: SlotMap::with_key(),
            buckets: BucketArray::new(config.bucket_count),
            max_load_factor: config.max_load_factor,
            gain_factor: config.gain_factor,
            begin: None,
            back: None,
            reentrancy: DebugReentrancy::new(),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        let _g = self.reentrancy.enter("hash");
        self.hasher.hash_one(q)
    }

    /// First node of `q`'s run in its bucket chain.
    fn locate<Q>(&self, q: &Q, hash: u64) -> Option<NodeKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let _g = self.reentrancy.enter("find");
        let mut cur = self.buckets.head(self.buckets.index_for(hash));
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if node.hash == hash && node.key.borrow() == q {
                return Some(k);
            }
            cur = node.next;
        }
        None
    }

    /// Last node of the equal-key run starting at `first`.
    fn run_end(&self, first: NodeKey) -> NodeKey {
        let _g = self.reentrancy.enter("equal_range");
        let key = &self.nodes[first].key;
        let mut last = first;
        while let Some(next) = self.nodes[last].next {
            if self.nodes[next].key != *key {
                break;
            }
            last = next;
        }
        last
    }

    fn find_node<Q>(&self, q: &Q) -> Option<NodeKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.locate(q, self.make_hash(q))
    }

    /// Bucket that `q` hashes to under the current bucket count.
    pub fn bucket_index<Q>(&self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.buckets.index_for(self.make_hash(q))
    }

    /// Link a new node for `key`. Unique tables refuse an existing key and
    /// never call `make`; multi tables splice in front of the existing run.
    fn link_with<F>(&mut self, hash: u64, key: K, make: F) -> Option<NodeKey>
    where
        F: FnOnce() -> V,
    {
        let found = self.locate(&key, hash);
        if found.is_some() && !MULTI {
            return None;
        }
        let k = self.nodes.insert(Node::detached(hash, key, make()));
        match found {
            Some(f) => self.splice_before(f, k),
            None => self.push_front(k),
        }
        self.restore_bounds(Relink::Linked(k));
        self.grow_if_needed();
        Some(k)
    }

    /// Insert `key -> value`. On a unique table an existing key leaves the
    /// table unchanged and the end cursor is returned.
    pub fn insert(&mut self, key: K, value: V) -> Cursor {
        self.insert_with(key, || value)
    }

    /// Like `insert`, but builds the value only if a node is created.
    pub fn insert_with<F>(&mut self, key: K, make: F) -> Cursor
    where
        F: FnOnce() -> V,
    {
        let hash = self.make_hash(&key);
        let pos = Position::from(self.link_with(hash, key, make));
        Cursor::new(self.id, pos)
    }

    pub fn try_insert(&mut self, key: K, value: V) -> Result<Cursor, InsertError> {
        let c = self.insert(key, value);
        if c.is_end() {
            Err(InsertError::DuplicateKey)
        } else {
            Ok(c)
        }
    }

    /// Cursor at the first node with key `q`, or the end cursor.
    pub fn find<Q>(&self, q: &Q) -> Cursor
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        Cursor::new(self.id, Position::from(self.find_node(q)))
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_node(q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_node(q).map(|k| &self.nodes[k].value)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_node(q).map(|k| {
            let n = &self.nodes[k];
            (&n.key, &n.value)
        })
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let k = self.find_node(q)?;
        Some(&mut self.nodes[k].value)
    }

    /// Inclusive `(first, last)` cursors over the run of `q`, or
    /// `(end, end)` when absent.
    pub fn equal_range<Q>(&self, q: &Q) -> (Cursor, Cursor)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.find_node(q) {
            Some(first) => {
                let last = self.run_end(first);
                (
                    Cursor::new(self.id, Position::Node(first)),
                    Cursor::new(self.id, Position::Node(last)),
                )
            }
            None => (self.end(), self.end()),
        }
    }

    pub fn equal_range_iter<Q>(&self, q: &Q) -> EqualRangeIter<'_, K, V, S, MULTI>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bounds = self.find_node(q).map(|first| (first, self.run_end(first)));
        EqualRangeIter::new(self, bounds)
    }

    /// Length of `q`'s run: 0 or 1 on unique tables.
    pub fn count<Q>(&self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.equal_range_iter(q).count()
    }

    /// Erase every node whose key equals `q`.
    pub fn erase_equal<Q>(&mut self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (first, last) = self.equal_range(q);
        self.erase_range(first, last)
    }

    /// Move every node of `other` into `self`, leaving `other` empty. On a
    /// unique table entries whose key is already present are dropped; on a
    /// multi table they join the existing run. Keys are re-hashed with this
    /// table's hasher.
    pub fn merge(&mut self, other: &mut Self) {
        let incoming = other.drain_ordered();
        let total = incoming.len();
        let mut moved = 0usize;
        for (key, value) in incoming {
            let hash = self.make_hash(&key);
            if self.link_with(hash, key, || value).is_some() {
                moved += 1;
            }
        }
        trace!(moved, dropped = total - moved, "merge");
    }
}

impl<K, V, S, const MULTI: bool> Traverse for ChainTable<K, V, S, MULTI> {
    type Key = K;
    type Value = V;

    fn table_id(&self) -> TableId {
        self.id
    }

    fn begin_position(&self) -> Position {
        Position::from(self.begin)
    }

    fn back_position(&self) -> Position {
        Position::from(self.back)
    }

    fn to_next(&self, pos: &mut Position) {
        *pos = match *pos {
            Position::End => Position::End,
            Position::BeforeBegin => self.begin_position(),
            Position::Node(k) => self.next_of(k),
        };
    }

    fn to_prev(&self, pos: &mut Position) {
        *pos = match *pos {
            Position::BeforeBegin => Position::BeforeBegin,
            Position::End => self.back_position(),
            Position::Node(k) => self.prev_of(k),
        };
    }

    fn entry_at(&self, pos: Position) -> Option<(&K, &V)> {
        let n = self.nodes.get(pos.node()?)?;
        Some((&n.key, &n.value))
    }
}

impl<K, V, S, const MULTI: bool> Extend<(K, V)> for ChainTable<K, V, S, MULTI>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S, const MULTI: bool> FromIterator<(K, V)> for ChainTable<K, V, S, MULTI>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut t = Self::default();
        t.extend(iter);
        t
    }
}

impl<K, V, S, const MULTI: bool> IntoIterator for ChainTable<K, V, S, MULTI> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.drain_ordered())
    }
}

impl<'a, K, V, S, const MULTI: bool> IntoIterator for &'a ChainTable<K, V, S, MULTI> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S, MULTI>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<K, V, S, const MULTI: bool> ChainTable<K, V, S, MULTI>
where
    K: Eq + Hash + fmt::Debug,
    S: BuildHasher,
{
    /// Panics unless every structural invariant holds.
    pub(crate) fn assert_invariants(&self) {
        let mut reachable = 0usize;
        let mut first_head = None;
        let mut last_tail = None;
        for index in 0..self.buckets.len() {
            let mut prev = None;
            let mut cur = self.buckets.head(index);
            if let Some(h) = cur {
                first_head.get_or_insert(h);
            }
            let mut seen_keys: Vec<&K> = Vec::new();
            while let Some(k) = cur {
                let node = &self.nodes[k];
                assert_eq!(self.buckets.index_for(node.hash), index, "node in wrong bucket");
                assert_eq!(node.hash, self.make_hash(&node.key), "stale stored hash");
                assert_eq!(node.prev, prev, "broken prev link");
                if MULTI {
                    if let Some(&last) = seen_keys.last() {
                        if *last != node.key {
                            assert!(
                                !seen_keys.contains(&&node.key),
                                "run of {:?} is not contiguous",
                                node.key
                            );
                        }
                    }
                } else {
                    assert!(!seen_keys.contains(&&node.key), "duplicate {:?}", node.key);
                }
                seen_keys.push(&node.key);
                reachable += 1;
                prev = Some(k);
                cur = node.next;
            }
            if prev.is_some() {
                last_tail = prev;
            }
        }
        assert_eq!(reachable, self.nodes.len(), "unreachable nodes");
        assert_eq!(self.begin, first_head, "begin is not the first chain head");
        assert_eq!(self.back, last_tail, "back is not the last chain tail");

        let forward = self.ordered_keys();
        let mut backward = Vec::with_capacity(forward.len());
        let mut pos = Position::End;
        loop {
            self.to_prev(&mut pos);
            match pos {
                Position::Node(k) => backward.push(k),
                _ => break,
            }
        }
        backward.reverse();
        assert_eq!(forward.len(), self.nodes.len());
        assert_eq!(forward, backward, "backward walk disagrees with forward walk");
        assert!(self.load_factor() <= self.max_load_factor, "load factor overflow");
    }
}
