//! Order restoration by exchanges, with an undo log.
//!
//! Every exchange made during one heap operation is appended to an exchange
//! log. Exchanges are their own inverse, so replaying the log backwards puts
//! every node back where it was. A failed comparison therefore never leaves a
//! half-sifted tree behind.

use super::node::{self, Side};
use super::BrandedTreeHeap;
use crate::collections::order::{ComparisonFailed, HeapOrder};

/// One exchange: `lower` was a direct child of `upper` and moved above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Exchange {
    pub(crate) upper: usize,
    pub(crate) lower: usize,
}

impl<'brand, T, C> BrandedTreeHeap<'brand, T, C> {
    /// Exchanges `node` with its direct child `child`.
    ///
    /// `root` and `frontier` name positions, so they follow whichever node now
    /// sits in the position they named.
    pub(super) fn exchange_nodes(&mut self, node: usize, child: usize) -> bool {
        if !node::exchange(&mut self.nodes, node, child) {
            return false;
        }
        if self.root == Some(node) {
            self.root = Some(child);
        }
        if self.frontier == Some(node) {
            self.frontier = Some(child);
        } else if self.frontier == Some(child) {
            self.frontier = Some(node);
        }
        true
    }

    fn logged_exchange(&mut self, log: &mut Vec<Exchange>, upper: usize, lower: usize) {
        if self.exchange_nodes(upper, lower) {
            log.push(Exchange { upper, lower });
        }
    }

    /// Undoes logged exchanges, newest first, until `mark` entries remain.
    pub(super) fn rewind(&mut self, log: &mut Vec<Exchange>, mark: usize) {
        while log.len() > mark {
            let Some(Exchange { upper, lower }) = log.pop() else {
                break;
            };
            let undone = self.exchange_nodes(lower, upper);
            debug_assert!(undone, "logged exchange {upper}<->{lower} no longer adjacent");
        }
    }

    /// Detaches `child` from `parent`'s `side` slot.
    pub(super) fn unlink(&mut self, parent: usize, side: Side, child: usize) {
        node::set_child(&mut self.nodes, parent, side, None);
        self.nodes[child].parent = None;
    }
}

impl<'brand, T, C: HeapOrder<T>> BrandedTreeHeap<'brand, T, C> {
    /// `true` if the value at `a` is strictly before the value at `b`.
    #[inline]
    pub(super) fn precedes(&self, a: usize, b: usize) -> Result<bool, ComparisonFailed> {
        self.order.try_lt(&self.nodes[a].value, &self.nodes[b].value)
    }

    /// Moves `node` toward the root while it precedes its parent.
    ///
    /// On failure the exchanges made so far stay in `log`; the caller rewinds.
    pub(super) fn sift_up(&mut self, node: usize, log: &mut Vec<Exchange>) -> Result<(), ComparisonFailed> {
        while let Some(parent) = self.nodes[node].parent {
            if !self.precedes(node, parent)? {
                break;
            }
            self.logged_exchange(log, parent, node);
        }
        Ok(())
    }

    /// Restores order below `node`.
    ///
    /// On failure, every exchange logged since entry (this level's own and those
    /// of re-sifts that already succeeded) has been undone before returning.
    pub(super) fn sift_down(&mut self, node: usize, log: &mut Vec<Exchange>) -> Result<(), ComparisonFailed> {
        let mark = log.len();
        let result = self.sift_down_step(node, log);
        if result.is_err() {
            self.rewind(log, mark);
        }
        result
    }

    fn sift_down_step(&mut self, node: usize, log: &mut Vec<Exchange>) -> Result<(), ComparisonFailed> {
        let (left, right) = {
            let n = &self.nodes[node];
            (n.left, n.right)
        };
        let Some(mut minimum) = left else {
            return Ok(());
        };
        if let Some(right) = right {
            if self.precedes(right, minimum)? {
                minimum = right;
            }
        }
        if !self.precedes(minimum, node)? {
            return Ok(());
        }

        self.logged_exchange(log, node, minimum);

        // The exchange can break order around `minimum` in any direction.
        if let Some(parent) = self.nodes[minimum].parent {
            self.sift_down(parent, log)?;
        }
        if let Some(left) = self.nodes[minimum].left {
            self.sift_down(left, log)?;
        }
        if let Some(right) = self.nodes[minimum].right {
            self.sift_down(right, log)?;
        }
        Ok(())
    }
}
