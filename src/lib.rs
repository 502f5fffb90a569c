//! # `tripod-heap` - Linked Binary Heap with All-or-Nothing Updates
//!
//! A priority queue whose complete-tree shape is an explicit node graph: every
//! node has three legs (parent, left, right) and nodes are relinked, never
//! renumbered. Insert and extract-minimum give the strong guarantee: if the
//! ordering predicate fails partway through, the heap is left exactly as it was.
//!
//! ## Guarantees
//!
//! - **Shape**: the tree is always complete; the last level fills left to right.
//! - **Order**: no node is preceded by one of its children (min-heap).
//! - **Atomicity**: `push` and `pop` either fully succeed or return
//!   [`ComparisonFailed`] with no observable change.
//! - **No leaks**: a node discarded by a failed insert returns its slot to the
//!   pool's free list.
//!
//! ## Architecture
//!
//! 1. **Node pool** ([`alloc::NodePool`]): an arena of slots addressed by index.
//! 2. **Exchange**: swaps a node with one of its direct children by relinking.
//!    It cannot fail and is its own inverse.
//! 3. **Position finder**: walks from the root following the binary digits of
//!    the element count to reach the last node or the next free slot.
//! 4. **Insert / extract**: attach or relocate, then sift with every exchange
//!    logged so a failed comparison can be rewound.
//!
//! Heaps are branded with a [`GhostToken`]: reads take `&GhostToken<'brand>`,
//! mutations take `&mut GhostToken<'brand>`.
//!
//! ## Example
//!
//! ```rust
//! use tripod_heap::{BrandedTreeHeap, ComparisonFailed, GhostToken};
//!
//! GhostToken::new(|mut token| {
//!     let picky = |a: &i32, b: &i32| if *a == 13 || *b == 13 { Err(ComparisonFailed) } else { Ok(a < b) };
//!     let mut heap = BrandedTreeHeap::with_order(picky);
//!     heap.extend_from(&mut token, [5, 3, 8]).unwrap();
//!
//!     // The failed push leaves nothing behind.
//!     assert_eq!(heap.push(&mut token, 13), Err(ComparisonFailed));
//!     assert_eq!(heap.len(), 3);
//!     assert_eq!(heap.pop(&mut token), Ok(Some(3)));
//! });
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod macros;

pub mod alloc;
pub mod collections;
pub mod token;

pub use collections::{BrandedTreeHeap, ComparisonFailed, HeapOrder, LessThan, LevelOrder, Natural};
pub use token::GhostToken;

const _: () = {
    use core::mem;

    // Tokens and predicates without state are ZSTs.
    assert!(mem::size_of::<GhostToken<'static>>() == 0);
    assert!(mem::size_of::<Natural>() == 0);

    // A node is its value plus three links, with no extra bookkeeping.
    assert!(
        mem::size_of::<collections::tree_heap::node::TreeNode<u64>>()
            <= mem::size_of::<u64>() + 3 * mem::size_of::<Option<usize>>()
    );
};
