//! Bucket array: one chain entry point per slot, owning nothing.

use crate::node::NodeKey;
#[cfg(test)]
use core::cell::Cell;

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Bucket {
    pub(crate) head: Option<NodeKey>,
}

#[derive(Clone, Debug)]
pub(crate) struct BucketArray {
    slots: Vec<Bucket>,
    // Occupied-bucket scans performed so far.
    #[cfg(test)]
    scans: Cell<usize>,
}

impl BucketArray {
    /// `count` must be non-zero.
    pub(crate) fn new(count: usize) -> Self {
        debug_assert!(count > 0, "bucket array cannot be empty");
        Self {
            slots: vec![Bucket::default(); count],
            #[cfg(test)]
            scans: Cell::new(0),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn index_for(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    #[inline]
    pub(crate) fn head(&self, index: usize) -> Option<NodeKey> {
        self.slots[index].head
    }

    #[inline]
    pub(crate) fn set_head(&mut self, index: usize, head: Option<NodeKey>) {
        self.slots[index].head = head;
    }

    /// First non-empty bucket at or after `from`.
    pub(crate) fn first_occupied_from(&self, from: usize) -> Option<(usize, NodeKey)> {
        #[cfg(test)]
        self.scans.set(self.scans.get() + 1);
        self.slots
            .iter()
            .enumerate()
            .skip(from)
            .find_map(|(i, b)| b.head.map(|h| (i, h)))
    }

    /// Last non-empty bucket strictly before `until`.
    pub(crate) fn last_occupied_before(&self, until: usize) -> Option<(usize, NodeKey)> {
        #[cfg(test)]
        self.scans.set(self.scans.get() + 1);
        self.slots[..until.min(self.slots.len())]
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, b)| b.head.map(|h| (i, h)))
    }

    #[cfg(test)]
    pub(crate) fn scans(&self) -> usize {
        self.scans.get()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.iter_mut().for_each(|b| b.head = None);
    }
}
