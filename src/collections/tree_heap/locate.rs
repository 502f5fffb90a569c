//! Position finding by pointer walks.
//!
//! Positions are 1-based level-order numbers: the root is 1 and the children of
//! position `p` are `2p` and `2p + 1`. Writing `p` in binary and dropping the
//! leading 1 gives the root-to-node path (`0` = left, `1` = right), so no array
//! index is ever needed.

use super::BrandedTreeHeap;
use crate::macros::heap_trace;

impl<'brand, T, C> BrandedTreeHeap<'brand, T, C> {
    /// Node at level-order `position`, or `None` if the position is not occupied.
    pub(super) fn locate(&self, position: usize) -> Option<usize> {
        if position == 0 || position > self.len {
            return None;
        }
        let mut current = self.root?;
        let depth = position.ilog2();
        for shift in (0..depth).rev() {
            let node = &self.nodes[current];
            current = if (position >> shift) & 1 == 1 {
                node.right?
            } else {
                node.left?
            };
        }
        Some(current)
    }

    /// Node in the last level-order position.
    #[inline]
    pub(super) fn locate_last(&self) -> Option<usize> {
        self.locate(self.len)
    }

    /// Node that becomes the parent of the next inserted node.
    ///
    /// Must be called with `len` already counting the node whose attachment
    /// filled the current frontier.
    pub(super) fn locate_next_free(&self) -> Option<usize> {
        let root = self.root?;

        // A new level starts under the leftmost node.
        if (self.len + 1).is_power_of_two() {
            heap_trace!(trace, len = self.len, "frontier moves to a new level");
            return Some(self.leftmost(root));
        }

        let mut current = self.frontier?;
        while let Some(parent) = self.nodes[current].parent {
            if self.nodes[parent].right != Some(current) {
                break;
            }
            current = parent;
        }
        let parent = self.nodes[current].parent?;
        let right = self.nodes[parent].right?;
        heap_trace!(trace, len = self.len, "frontier advances within its level");
        Some(self.leftmost(right))
    }

    fn leftmost(&self, mut current: usize) -> usize {
        while let Some(left) = self.nodes[current].left {
            current = left;
        }
        current
    }
}
