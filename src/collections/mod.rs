//! Heap collections and their ordering predicates.
//!
//! - `order`: fallible ordering predicates and the `ComparisonFailed` error
//! - `tree_heap`: the linked, all-or-nothing binary min-heap

pub mod order;
pub mod tree_heap;

pub use order::{ComparisonFailed, HeapOrder, LessThan, Natural};
pub use tree_heap::{BrandedTreeHeap, LevelOrder};
