//! Addressable binary min-heap.
//!
//! Items are ordered by their `Ord` implementation; equal items come out in
//! insertion order (FIFO). Every insertion returns a [`HeapHandle`] that can
//! later remove that exact item in O(log n), which is what the search uses to
//! emulate decrease-key.

use std::cmp::Ordering;

const VACANT: usize = usize::MAX;

/// Identifies one inserted item.
///
/// A handle goes stale once its item leaves the heap (extracted, removed or
/// cleared); stale handles are ignored, even if their slot was reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HeapHandle {
    slot: usize,
    seq: u64,
}

#[derive(Debug)]
struct Entry<T> {
    item: T,
    /// Monotonically increasing insertion counter, used to break ties.
    seq: u64,
    slot: usize,
}

/// Where a slot's item currently sits in `entries`.
#[derive(Copy, Clone, Debug)]
struct Slot {
    seq: u64,
    pos: usize,
}

/// A min-heap with remove-by-handle.
#[derive(Debug)]
pub struct MinHeap<T> {
    entries: Vec<Entry<T>>,
    slots: Vec<Slot>,
    free: Vec<usize>,
    seq: u64,
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            seq: 0,
        }
    }

    /// Insert an item and return the handle that identifies it.
    pub fn insert(&mut self, item: T) -> HeapHandle {
        let seq = self.seq;
        self.seq += 1;

        let pos = self.entries.len();
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Slot { seq, pos };
                slot
            }
            None => {
                self.slots.push(Slot { seq, pos });
                self.slots.len() - 1
            }
        };

        self.entries.push(Entry { item, seq, slot });
        self.sift_up(pos);
        HeapHandle { slot, seq }
    }

    /// Remove and return the smallest item.
    pub fn extract(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        self.remove_at(0)
    }

    /// The smallest item, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.entries.first().map(|e| &e.item)
    }

    /// Remove the item identified by `handle`.
    ///
    /// Returns `None` if the handle is stale.
    pub fn remove(&mut self, handle: HeapHandle) -> Option<T> {
        let pos = self.position(handle)?;
        self.remove_at(pos)
    }

    /// Whether the item identified by `handle` is still in the heap.
    #[inline]
    pub fn contains(&self, handle: HeapHandle) -> bool {
        self.position(handle).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every item. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.slots.clear();
        self.free.clear();
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    #[inline]
    fn position(&self, handle: HeapHandle) -> Option<usize> {
        let slot = self.slots.get(handle.slot)?;
        (slot.seq == handle.seq && slot.pos != VACANT).then_some(slot.pos)
    }

    fn remove_at(&mut self, pos: usize) -> Option<T> {
        let last = self.entries.len().checked_sub(1)?;
        self.swap(pos, last);
        let removed = self.entries.pop()?;
        self.slots[removed.slot].pos = VACANT;
        self.free.push(removed.slot);

        if pos < self.entries.len() {
            let pos = self.sift_down(pos);
            self.sift_up(pos);
        }
        Some(removed.item)
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        let (ea, eb) = (&self.entries[a], &self.entries[b]);
        ea.item.cmp(&eb.item).then(ea.seq.cmp(&eb.seq)) == Ordering::Less
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        let (sa, sb) = (self.entries[a].slot, self.entries[b].slot);
        self.slots[sa].pos = a;
        self.slots[sb].pos = b;
    }

    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) -> usize {
        let len = self.entries.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, i) {
                break;
            }
            self.swap(child, i);
            i = child;
        }
        i
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
