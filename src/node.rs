//! Chain nodes and the position handle that addresses them.

use slotmap::new_key_type;

new_key_type! {
    /// Generational handle to a node in a table's arena.
    pub struct NodeKey;
}

/// One stored element. `prev`/`next` link the node into its bucket's chain;
/// they are handles into the same arena, not owning pointers.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) hash: u64,
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) prev: Option<NodeKey>,
    pub(crate) next: Option<NodeKey>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn detached(hash: u64, key: K, value: V) -> Self {
        Self {
            hash,
            key,
            value,
            prev: None,
            next: None,
        }
    }
}

/// A place in a table's logical sequence.
///
/// The two sentinels delimit the sequence and never name storage, so they
/// stay meaningful across rehashes and while the table is empty.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Position {
    BeforeBegin,
    Node(NodeKey),
    End,
}

impl Position {
    pub fn is_before_begin(&self) -> bool {
        matches!(self, Position::BeforeBegin)
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Position::End)
    }

    pub fn node(&self) -> Option<NodeKey> {
        match *self {
            Position::Node(k) => Some(k),
            _ => None,
        }
    }
}

impl From<NodeKey> for Position {
    fn from(k: NodeKey) -> Self {
        Position::Node(k)
    }
}

impl From<Option<NodeKey>> for Position {
    /// `None` maps to the end sentinel.
    fn from(k: Option<NodeKey>) -> Self {
        k.map_or(Position::End, Position::Node)
    }
}
