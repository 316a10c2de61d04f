//! chained-hash-table: separate-chaining hash maps, multimaps, sets and
//! multisets with bucket-ordered, bidirectional, rehash-stable cursors.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one engine, four containers. Every variant is a thin newtype over
//!   `ChainTable<K, V, S, MULTI>`; sets use `V = ()`.
//! - Layers:
//!   - `Node` / `BucketArray`: nodes sit in a generational `SlotMap`; each
//!     bucket stores only the head handle of its chain and each node links
//!     to its chain neighbours by handle.
//!   - `ChainTable`: insertion, lookup, erase, merge, rehash and the
//!     traversal primitives that stitch the per-bucket chains into one
//!     logical sequence (bucket order, then chain order).
//!   - `Cursor` + `Traverse`: a cursor is a `(TableId, Position)` pair and
//!     moves only through the `Traverse` interface of its table.
//!   - `HashMap`, `HashMultiMap`, `HashSet`, `HashMultiSet`: select node
//!     shape and unique/multi insertion.
//!
//! Constraints
//! - Single-threaded; no internal locking.
//! - Unique tables refuse a duplicate key and report it with the end
//!   cursor (or `InsertError::DuplicateKey` from `try_insert`).
//! - Multi tables keep equal keys in one contiguous run per chain; a new
//!   duplicate is placed in front of its run.
//! - The table only grows on its own: when `len / bucket_count` exceeds the
//!   max load factor the bucket array is multiplied by the gain factor.
//!   `shrink_to_fit` is the only way down.
//!
//! Sentinels and cursor stability
//! - `Position::BeforeBegin` and `Position::End` are enum variants, not
//!   storage, so cursors parked on them survive anything.
//! - Rehashing rebuilds only the bucket array; node handles never change,
//!   so cursors on live nodes survive rehashes and erasure of other nodes.
//! - A cursor on an erased node is stale: dereferencing yields `None`,
//!   stepping forward lands on `End`, stepping back on `BeforeBegin`.
//! - `begin`/`back` are tracked eagerly and restored in a single routine
//!   after each structural change.
//!
//! Hasher and rehashing invariants
//! - Each node stores its `u64` hash; `K: Hash` is never invoked after
//!   insertion, so rehashing never calls into user code. `merge` re-hashes
//!   incoming keys because the two tables may be seeded differently.
//! - Calls into `K: Hash`/`K: Eq` are bracketed by a debug-only reentrancy
//!   guard.
//!
//! Notes and non-goals
//! - No open addressing and no automatic downsizing.
//! - Hash values are not stable across platforms or processes.

mod adaptor;
mod bucket;
pub mod config;
mod cursor;
mod error;
pub mod iter;
mod map;
mod node;
mod reentrancy;
mod set;
pub mod table;
mod table_proptest;

// Public surface
pub use config::TableConfig;
pub use cursor::{Cursor, TableId, Traverse};
pub use error::{ConfigError, InsertError};
pub use map::{HashMap, HashMultiMap};
pub use node::{NodeKey, Position};
pub use set::{HashMultiSet, HashSet, SetIntoIter};
pub use table::{ChainTable, MultiTable, UniqueTable};
