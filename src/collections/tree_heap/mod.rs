//! `BrandedTreeHeap`: a binary min-heap over an explicit node graph.
//!
//! The heap keeps a *complete* binary tree of linked nodes (parent, left, right)
//! instead of an implicit array layout. Order is restored by exchanging nodes,
//! never by moving values, and every exchange is logged. That makes `push` and
//! `pop` all-or-nothing: if the ordering predicate fails mid-way, the logged
//! exchanges are replayed backwards and the call returns
//! [`ComparisonFailed`] with the heap exactly as it was.
//!
//! # Layout
//! - Nodes live in a [`NodePool`](crate::alloc::NodePool) and link to each
//!   other by slot index.
//! - `frontier` caches the node that receives the next inserted child. It is
//!   recomputed from the element count with pointer walks only (see `locate`).
//!
//! # Example
//!
//! ```rust
//! use tripod_heap::{BrandedTreeHeap, GhostToken};
//!
//! GhostToken::new(|mut token| {
//!     let mut heap = BrandedTreeHeap::new();
//!     for x in [5, 1, 4, 2, 3] {
//!         heap.push(&mut token, x).unwrap();
//!     }
//!     assert_eq!(heap.peek(&token), Some(&1));
//!     assert_eq!(heap.into_sorted_vec(&mut token), Ok(vec![1, 2, 3, 4, 5]));
//! });
//! ```

mod iter;
mod locate;
pub(crate) mod node;
mod serialize;
mod sift;


pub use iter::LevelOrder;

use crate::alloc::NodePool;
use crate::collections::order::{ComparisonFailed, HeapOrder, Natural};
use crate::macros::heap_trace;
use crate::token::InvariantLifetime;
use crate::GhostToken;
use core::fmt;
use node::{Nodes, Side, TreeNode};
use sift::Exchange;

/// A min-heap whose shape is a linked complete binary tree.
///
/// Access is gated by a `GhostToken<'brand>`. The ordering `C` defaults to the
/// element's natural `Ord`.
pub struct BrandedTreeHeap<'brand, T, C = Natural> {
    nodes: Nodes<T>,
    root: Option<usize>,
    /// Parent of the next free slot.
    frontier: Option<usize>,
    len: usize,
    order: C,
    /// Reused exchange log; empty between operations.
    journal: Vec<Exchange>,
    _brand: InvariantLifetime<'brand>,
}

/// Neighbour indices captured before an extraction touches the tree.
#[derive(Debug, Clone, Copy)]
struct Relocation {
    removed: usize,
    removed_left: Option<usize>,
    removed_right: Option<usize>,
    last: usize,
    last_parent: usize,
    last_side: Side,
    frontier: Option<usize>,
}

impl<'brand, T: Ord> BrandedTreeHeap<'brand, T> {
    /// Creates an empty heap ordered by `T`'s `Ord`.
    pub fn new() -> Self {
        Self::with_order(Natural)
    }

    /// Creates an empty heap with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_order(capacity, Natural)
    }
}

impl<'brand, T, C> BrandedTreeHeap<'brand, T, C> {
    /// Creates an empty heap ordered by `order`.
    pub fn with_order(order: C) -> Self {
        Self::from_parts(NodePool::new(), order)
    }

    /// Creates an empty heap ordered by `order` with room for `capacity` nodes.
    pub fn with_capacity_and_order(capacity: usize, order: C) -> Self {
        Self::from_parts(NodePool::with_capacity(capacity), order)
    }

    fn from_parts(nodes: Nodes<T>, order: C) -> Self {
        Self {
            nodes,
            root: None,
            frontier: None,
            len: 0,
            order,
            journal: Vec::new(),
            _brand: InvariantLifetime::new(),
        }
    }

    /// Number of elements in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the heap holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes the heap can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// The ordering predicate.
    pub fn order(&self) -> &C {
        &self.order
    }

    /// Returns the minimum element without removing it.
    pub fn peek<'a>(&'a self, _token: &'a GhostToken<'brand>) -> Option<&'a T> {
        self.root.map(|root| &self.nodes[root].value)
    }

    /// Iterates the elements in level order.
    pub fn iter<'a>(&'a self, _token: &'a GhostToken<'brand>) -> LevelOrder<'a, T> {
        self.level_order()
    }

    pub(crate) fn level_order(&self) -> LevelOrder<'_, T> {
        LevelOrder::new(&self.nodes, self.root, self.len)
    }

    /// Drops every element.
    pub fn clear(&mut self, _token: &mut GhostToken<'brand>) {
        self.nodes.clear();
        self.root = None;
        self.frontier = None;
        self.len = 0;
    }

    /// Checks the structural invariants by walking the node graph.
    ///
    /// Verifies link symmetry, that the tree is complete with exactly `len`
    /// reachable nodes (and no stray allocated ones), and that the frontier is
    /// the parent of the next free slot. Element order is checked separately by
    /// [`is_heap_ordered`](Self::is_heap_ordered), since it needs the predicate.
    pub fn is_well_formed(&self) -> bool {
        let Some(root) = self.root else {
            return self.len == 0 && self.frontier.is_none() && self.nodes.is_empty();
        };
        if self.nodes.get(root).map_or(true, |n| n.parent.is_some()) {
            return false;
        }

        // In level order a complete tree never has a node after the first gap.
        let mut queue = std::collections::VecDeque::from([root]);
        let mut seen = 0usize;
        let mut gap = false;
        while let Some(idx) = queue.pop_front() {
            seen += 1;
            if seen > self.len {
                return false;
            }
            let Some(node) = self.nodes.get(idx) else {
                return false;
            };
            for child in [node.left, node.right] {
                match child {
                    Some(child) => {
                        if gap || self.nodes.get(child).map(|c| c.parent) != Some(Some(idx)) {
                            return false;
                        }
                        queue.push_back(child);
                    }
                    None => gap = true,
                }
            }
        }

        seen == self.len
            && self.nodes.len() == self.len
            && self.frontier.is_some()
            && self.frontier == self.locate((self.len + 1) / 2)
    }

    #[inline]
    fn debug_assert_well_formed(&self) {
        debug_assert!(self.is_well_formed(), "heap shape invariant violated (len {})", self.len);
    }
}

impl<'brand, T, C: HeapOrder<T>> BrandedTreeHeap<'brand, T, C> {
    /// Inserts `value`.
    ///
    /// # Errors
    /// Returns [`ComparisonFailed`] if the ordering predicate fails. The heap is
    /// then unchanged and `value` is dropped.
    pub fn push(&mut self, _token: &mut GhostToken<'brand>, value: T) -> Result<(), ComparisonFailed> {
        self.insert(value)
    }

    /// Removes and returns the minimum element, or `Ok(None)` if empty.
    ///
    /// # Errors
    /// Returns [`ComparisonFailed`] if the ordering predicate fails. The heap is
    /// then unchanged and the minimum stays in place.
    pub fn pop(&mut self, _token: &mut GhostToken<'brand>) -> Result<Option<T>, ComparisonFailed> {
        self.extract()
    }

    /// Pushes every item of `items` in order.
    ///
    /// Stops at the first failure. Items pushed before it stay in the heap; the
    /// failing item and everything after it are dropped.
    ///
    /// # Errors
    /// Returns [`ComparisonFailed`] from the first failing push.
    pub fn extend_from<I>(&mut self, token: &mut GhostToken<'brand>, items: I) -> Result<(), ComparisonFailed>
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.push(token, item)?;
        }
        Ok(())
    }

    /// Drains the heap into a vector in ascending order.
    ///
    /// # Errors
    /// Returns [`ComparisonFailed`] if any extraction fails; the heap is consumed
    /// either way.
    pub fn into_sorted_vec(mut self, token: &mut GhostToken<'brand>) -> Result<Vec<T>, ComparisonFailed> {
        let mut sorted = Vec::with_capacity(self.len);
        while let Some(value) = self.pop(token)? {
            sorted.push(value);
        }
        Ok(sorted)
    }

    /// Checks that no node is preceded by one of its children.
    ///
    /// # Errors
    /// Returns [`ComparisonFailed`] if the predicate fails during the check.
    pub fn is_heap_ordered(&self, _token: &GhostToken<'brand>) -> Result<bool, ComparisonFailed> {
        for (idx, node) in self.nodes.iter() {
            for child in [node.left, node.right].into_iter().flatten() {
                if self.precedes(child, idx)? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    pub(crate) fn insert(&mut self, value: T) -> Result<(), ComparisonFailed> {
        let idx = self.nodes.alloc(TreeNode::detached(value));
        let Some(frontier) = self.frontier else {
            self.root = Some(idx);
            self.frontier = Some(idx);
            self.len = 1;
            return Ok(());
        };

        let side = if self.nodes[frontier].left.is_none() {
            Side::Left
        } else {
            Side::Right
        };
        node::set_child(&mut self.nodes, frontier, side, Some(idx));
        self.nodes[idx].parent = Some(frontier);
        self.len += 1;

        let mut log = core::mem::take(&mut self.journal);
        let result = self.sift_up(idx, &mut log);
        match result {
            Ok(()) => {
                if side == Side::Right {
                    self.frontier = self.locate_next_free();
                }
                self.debug_assert_well_formed();
            }
            Err(_) => {
                heap_trace!(debug, len = self.len - 1, undone = log.len(), "insert rolled back");
                self.rewind(&mut log, 0);
                self.unlink(frontier, side, idx);
                self.nodes.free(idx);
                self.len -= 1;
                self.debug_assert_well_formed();
            }
        }
        log.clear();
        self.journal = log;
        result
    }

    pub(crate) fn extract(&mut self) -> Result<Option<T>, ComparisonFailed> {
        let Some(root) = self.root else {
            return Ok(None);
        };
        if self.len == 1 {
            self.root = None;
            self.frontier = None;
            self.len = 0;
            return Ok(self.nodes.free(root).map(|node| node.value));
        }

        let relocation = self.relocate_last(root);
        let mut log = core::mem::take(&mut self.journal);
        let result = self.sift_down(relocation.last, &mut log);
        log.clear();
        self.journal = log;

        match result {
            Ok(()) => {
                let min = self.nodes.free(relocation.removed).map(|node| node.value);
                self.debug_assert_well_formed();
                Ok(min)
            }
            Err(err) => {
                self.restore(relocation);
                heap_trace!(debug, len = self.len, "extract rolled back");
                self.debug_assert_well_formed();
                Err(err)
            }
        }
    }

    /// Moves the last node into the root position, leaving the old root
    /// allocated but unreachable. Needs at least two nodes.
    fn relocate_last(&mut self, root: usize) -> Relocation {
        let last = self.locate_last().expect("complete tree has a last node");
        let last_parent = self.nodes[last].parent.expect("last node of a multi-node tree has a parent");
        let last_side = node::side_of(&self.nodes, last_parent, last).expect("parent links are symmetric");

        let snapshot = Relocation {
            removed: root,
            removed_left: self.nodes[root].left,
            removed_right: self.nodes[root].right,
            last,
            last_parent,
            last_side,
            frontier: self.frontier,
        };

        self.unlink(last_parent, last_side, last);
        // Read after unlinking: `last` may have been one of the root's children.
        let (left, right) = {
            let r = &self.nodes[root];
            (r.left, r.right)
        };
        {
            let l = &mut self.nodes[last];
            l.left = left;
            l.right = right;
        }
        for child in [left, right].into_iter().flatten() {
            self.nodes[child].parent = Some(last);
        }
        self.root = Some(last);
        self.len -= 1;
        self.frontier = self.locate((self.len + 1) / 2);
        snapshot
    }

    /// Undoes [`relocate_last`](Self::relocate_last) once sift-down has rewound.
    fn restore(&mut self, snapshot: Relocation) {
        let Relocation {
            removed,
            removed_left,
            removed_right,
            last,
            last_parent,
            last_side,
            frontier,
        } = snapshot;

        {
            let l = &mut self.nodes[last];
            l.left = None;
            l.right = None;
        }
        {
            let r = &mut self.nodes[removed];
            r.parent = None;
            r.left = removed_left;
            r.right = removed_right;
        }
        for child in [removed_left, removed_right].into_iter().flatten() {
            self.nodes[child].parent = Some(removed);
        }
        node::set_child(&mut self.nodes, last_parent, last_side, Some(last));
        self.nodes[last].parent = Some(last_parent);

        self.root = Some(removed);
        self.len += 1;
        self.frontier = frontier;
    }
}

impl<'brand, T: Ord> Default for BrandedTreeHeap<'brand, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'brand, T: Clone, C: Clone> Clone for BrandedTreeHeap<'brand, T, C> {
    /// Deep-copies the node graph. Slot indices are preserved, so `root` and
    /// `frontier` carry over to the copy unchanged.
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            frontier: self.frontier,
            len: self.len,
            order: self.order.clone(),
            journal: Vec::new(),
            _brand: InvariantLifetime::new(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.nodes.clone_from(&source.nodes);
        self.root = source.root;
        self.frontier = source.frontier;
        self.len = source.len;
        self.order.clone_from(&source.order);
    }
}

impl<'brand, T, C> fmt::Debug for BrandedTreeHeap<'brand, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrandedTreeHeap")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
