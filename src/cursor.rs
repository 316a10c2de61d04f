//! Detached cursors and the traversal interface they move through.
//!
//! A `Cursor` is a `(table identity, position)` pair. It borrows nothing, so
//! it survives inserts, erases of other nodes and rehashes; every movement or
//! dereference goes back through the table via [`Traverse`].

use crate::node::Position;
use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one table instance. Clones get a fresh identity; `swap`
/// exchanges identities together with contents.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TableId(u64);

impl TableId {
    pub(crate) fn fresh() -> Self {
        TableId(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Movement and dereference primitives a cursor needs from its table.
pub trait Traverse {
    type Key;
    type Value;

    fn table_id(&self) -> TableId;

    /// First node in bucket order, or `End` when empty.
    fn begin_position(&self) -> Position;

    /// Last node in bucket order, or `End` when empty.
    fn back_position(&self) -> Position;

    /// Step forward. `End` saturates.
    fn to_next(&self, pos: &mut Position);

    /// Step backward. `BeforeBegin` saturates.
    fn to_prev(&self, pos: &mut Position);

    fn entry_at(&self, pos: Position) -> Option<(&Self::Key, &Self::Value)>;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Cursor {
    table: TableId,
    pos: Position,
}

impl Cursor {
    pub(crate) fn new(table: TableId, pos: Position) -> Self {
        Self { table, pos }
    }

    pub fn table(&self) -> TableId {
        self.table
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn is_end(&self) -> bool {
        self.pos.is_end()
    }

    pub fn is_before_begin(&self) -> bool {
        self.pos.is_before_begin()
    }

    /// True when the cursor names a node rather than a sentinel. The node
    /// may still have been erased since; dereferencing then yields `None`.
    pub fn is_node(&self) -> bool {
        self.pos.node().is_some()
    }

    pub fn has_same_container(&self, other: &Cursor) -> bool {
        self.table == other.table
    }

    pub fn belongs_to<T: Traverse + ?Sized>(&self, table: &T) -> bool {
        self.table == table.table_id()
    }

    /// Advance within `table`; returns `false` without moving if the cursor
    /// belongs to another table.
    pub fn move_next<T: Traverse + ?Sized>(&mut self, table: &T) -> bool {
        if !self.belongs_to(table) {
            return false;
        }
        table.to_next(&mut self.pos);
        true
    }

    pub fn move_prev<T: Traverse + ?Sized>(&mut self, table: &T) -> bool {
        if !self.belongs_to(table) {
            return false;
        }
        table.to_prev(&mut self.pos);
        true
    }

    pub fn key<'a, T: Traverse + ?Sized>(&self, table: &'a T) -> Option<&'a T::Key> {
        self.entry(table).map(|(k, _)| k)
    }

    pub fn value<'a, T: Traverse + ?Sized>(&self, table: &'a T) -> Option<&'a T::Value> {
        self.entry(table).map(|(_, v)| v)
    }

    pub fn entry<'a, T: Traverse + ?Sized>(
        &self,
        table: &'a T,
    ) -> Option<(&'a T::Key, &'a T::Value)> {
        if !self.belongs_to(table) {
            return None;
        }
        table.entry_at(self.pos)
    }
}
