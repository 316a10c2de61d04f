//! Iterators over a `ChainTable` in bucket order.

use crate::cursor::Traverse;
use crate::node::{NodeKey, Position};
use crate::table::ChainTable;
use core::iter::FusedIterator;

/// Borrowing iterator over `(&K, &V)` in logical order, from either end.
pub struct Iter<'a, K, V, S, const MULTI: bool> {
    table: &'a ChainTable<K, V, S, MULTI>,
    front: Position,
    back: Position,
    remaining: usize,
}

impl<'a, K, V, S, const MULTI: bool> Iter<'a, K, V, S, MULTI> {
    pub(crate) fn new(table: &'a ChainTable<K, V, S, MULTI>) -> Self {
        Self {
            table,
            front: Position::BeforeBegin,
            back: Position::End,
            remaining: table.len(),
        }
    }
}

impl<K, V, S, const MULTI: bool> Clone for Iter<'_, K, V, S, MULTI> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, S, const MULTI: bool> Iterator for Iter<'a, K, V, S, MULTI> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let table: &'a ChainTable<K, V, S, MULTI> = self.table;
        table.to_next(&mut self.front);
        let item = table.entry_at(self.front)?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, S, const MULTI: bool> DoubleEndedIterator for Iter<'a, K, V, S, MULTI> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let table: &'a ChainTable<K, V, S, MULTI> = self.table;
        table.to_prev(&mut self.back);
        let item = table.entry_at(self.back)?;
        self.remaining -= 1;
        Some(item)
    }
}

impl<K, V, S, const MULTI: bool> ExactSizeIterator for Iter<'_, K, V, S, MULTI> {}
impl<K, V, S, const MULTI: bool> FusedIterator for Iter<'_, K, V, S, MULTI> {}

pub struct Keys<'a, K, V, S, const MULTI: bool> {
    inner: Iter<'a, K, V, S, MULTI>,
}

impl<'a, K, V, S, const MULTI: bool> Keys<'a, K, V, S, MULTI> {
    pub(crate) fn new(inner: Iter<'a, K, V, S, MULTI>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V, S, const MULTI: bool> Iterator for Keys<'a, K, V, S, MULTI> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, S, const MULTI: bool> DoubleEndedIterator for Keys<'_, K, V, S, MULTI> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V, S, const MULTI: bool> ExactSizeIterator for Keys<'_, K, V, S, MULTI> {}

pub struct Values<'a, K, V, S, const MULTI: bool> {
    inner: Iter<'a, K, V, S, MULTI>,
}

impl<'a, K, V, S, const MULTI: bool> Values<'a, K, V, S, MULTI> {
    pub(crate) fn new(inner: Iter<'a, K, V, S, MULTI>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V, S, const MULTI: bool> Iterator for Values<'a, K, V, S, MULTI> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, S, const MULTI: bool> DoubleEndedIterator for Values<'_, K, V, S, MULTI> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V, S, const MULTI: bool> ExactSizeIterator for Values<'_, K, V, S, MULTI> {}

/// Entries of one equal-key run, newest first.
pub struct EqualRangeIter<'a, K, V, S, const MULTI: bool> {
    table: &'a ChainTable<K, V, S, MULTI>,
    next: Option<NodeKey>,
    last: Option<NodeKey>,
}

impl<'a, K, V, S, const MULTI: bool> EqualRangeIter<'a, K, V, S, MULTI> {
    pub(crate) fn new(
        table: &'a ChainTable<K, V, S, MULTI>,
        bounds: Option<(NodeKey, NodeKey)>,
    ) -> Self {
        Self {
            table,
            next: bounds.map(|(first, _)| first),
            last: bounds.map(|(_, last)| last),
        }
    }
}

impl<'a, K, V, S, const MULTI: bool> Iterator for EqualRangeIter<'a, K, V, S, MULTI> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let k = self.next?;
        let table: &'a ChainTable<K, V, S, MULTI> = self.table;
        let item = table.entry_at(Position::Node(k))?;
        if Some(k) == self.last {
            self.next = None;
        } else {
            let mut pos = Position::Node(k);
            table.to_next(&mut pos);
            self.next = pos.node();
        }
        Some(item)
    }
}

impl<K, V, S, const MULTI: bool> FusedIterator for EqualRangeIter<'_, K, V, S, MULTI> {}

/// Owning iterator; entries come out in the table's logical order.
pub struct IntoIter<K, V> {
    inner: std::vec::IntoIter<(K, V)>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(entries: Vec<(K, V)>) -> Self {
        Self {
            inner: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
