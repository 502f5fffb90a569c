//! `NodePool`: an index-addressed arena for linked node structures.
//!
//! Nodes live in a single `Vec` and refer to each other by slot index, so links
//! stay valid while nodes are relinked and never need renumbering. Freed slots
//! are threaded onto a free list and reused by the next allocation.
//!
//! Allocation and freeing cannot fail on the comparison path: a node is either
//! committed by linking its index into a structure, or discarded by handing the
//! slot back with [`NodePool::free`].

use core::ops::{Index, IndexMut};

/// A slot in the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PoolSlot<T> {
    Occupied(T),
    /// Next free slot index.
    Free(Option<usize>),
}

/// An arena of `T` values addressed by stable `usize` indices.
#[derive(Debug)]
pub struct NodePool<T> {
    slots: Vec<PoolSlot<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> NodePool<T> {
    /// Creates an empty pool.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// Creates an empty pool with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots the pool can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Stores `value` and returns its slot index.
    pub fn alloc(&mut self, value: T) -> usize {
        self.len += 1;

        if let Some(idx) = self.free_head {
            let next = match self.slots[idx] {
                PoolSlot::Free(next) => next,
                PoolSlot::Occupied(_) => panic!("free list head points to an occupied slot"),
            };
            self.free_head = next;
            self.slots[idx] = PoolSlot::Occupied(value);
            idx
        } else {
            let idx = self.slots.len();
            self.slots.push(PoolSlot::Occupied(value));
            idx
        }
    }

    /// Removes the value at `index` and returns it.
    ///
    /// Returns `None` if `index` is out of range or already free.
    pub fn free(&mut self, index: usize) -> Option<T> {
        let slot = self.slots.get_mut(index)?;
        if matches!(slot, PoolSlot::Free(_)) {
            return None;
        }
        let taken = core::mem::replace(slot, PoolSlot::Free(self.free_head));
        self.free_head = Some(index);
        self.len -= 1;
        match taken {
            PoolSlot::Occupied(value) => Some(value),
            PoolSlot::Free(_) => None,
        }
    }

    /// Returns the value at `index` if the slot is occupied.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        match self.slots.get(index)? {
            PoolSlot::Occupied(value) => Some(value),
            PoolSlot::Free(_) => None,
        }
    }

    /// Returns the value at `index` mutably if the slot is occupied.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        match self.slots.get_mut(index)? {
            PoolSlot::Occupied(value) => Some(value),
            PoolSlot::Free(_) => None,
        }
    }

    /// Returns `true` if `index` names an occupied slot.
    pub fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Drops every value and forgets all slots. Capacity is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }

    /// Iterates occupied slots as `(index, &value)` in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| match slot {
                PoolSlot::Occupied(value) => Some((idx, value)),
                PoolSlot::Free(_) => None,
            })
    }
}

impl<T> Default for NodePool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for NodePool<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            free_head: self.free_head,
            len: self.len,
        }
    }

    // Slot indices are copied verbatim, so links held by the source stay valid
    // against the copy.
    fn clone_from(&mut self, source: &Self) {
        self.slots.clone_from(&source.slots);
        self.free_head = source.free_head;
        self.len = source.len;
    }
}

impl<T> Index<usize> for NodePool<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("node index {index} refers to a free slot"),
        }
    }
}

impl<T> IndexMut<usize> for NodePool<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("node index {index} refers to a free slot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_free_reuses_slots() {
        let mut pool = NodePool::new();
        let a = pool.alloc("a");
        let b = pool.alloc("b");
        let c = pool.alloc("c");
        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(pool.len(), 3);

        assert_eq!(pool.free(b), Some("b"));
        assert_eq!(pool.free(b), None);
        assert!(!pool.contains(b));
        assert_eq!(pool.len(), 2);

        // Most recently freed slot comes back first.
        assert_eq!(pool.free(a), Some("a"));
        assert_eq!(pool.alloc("d"), a);
        assert_eq!(pool.alloc("e"), b);
        assert_eq!(pool.alloc("f"), 3);
        assert_eq!(pool[b], "e");
    }

    #[test]
    fn test_index_mut_and_iter() {
        let mut pool = NodePool::with_capacity(4);
        for i in 0..4 {
            pool.alloc(i * 10);
        }
        pool.free(2);
        pool[3] += 1;

        let seen: Vec<_> = pool.iter().map(|(idx, v)| (idx, *v)).collect();
        assert_eq!(seen, vec![(0, 0), (1, 10), (3, 31)]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut pool = NodePool::new();
        let a = pool.alloc(String::from("x"));
        pool.alloc(String::from("y"));
        pool.free(a);

        let mut copy = pool.clone();
        copy[1].push('!');
        assert_eq!(pool[1], "y");
        assert_eq!(copy[1], "y!");
        // Free list is carried over.
        assert_eq!(copy.alloc(String::from("z")), a);

        let mut target = NodePool::new();
        target.alloc(String::from("stale"));
        target.clone_from(&pool);
        assert_eq!(target.len(), 1);
        assert!(!target.contains(a));
    }

    #[test]
    #[should_panic(expected = "free slot")]
    fn test_index_free_slot_panics() {
        let mut pool = NodePool::new();
        let a = pool.alloc(1u8);
        pool.free(a);
        let _value: u8 = pool[a];
    }
}
