use super::node::Nodes;
use std::collections::VecDeque;

/// Level-order iterator over a heap's elements.
///
/// Yields the root first, then each level left to right. Only the root is
/// guaranteed to be the minimum; the rest follow tree layout, not sort order.
pub struct LevelOrder<'a, T> {
    nodes: &'a Nodes<T>,
    queue: VecDeque<usize>,
    remaining: usize,
}

impl<'a, T> LevelOrder<'a, T> {
    pub(super) fn new(nodes: &'a Nodes<T>, root: Option<usize>, len: usize) -> Self {
        let mut queue = VecDeque::with_capacity(len / 2 + 1);
        queue.extend(root);
        Self {
            nodes,
            queue,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.queue.pop_front()?;
        let node = &self.nodes[idx];
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for LevelOrder<'a, T> {}

#[cfg(test)]
mod tests {
    use crate::{BrandedTreeHeap, GhostToken};

    #[test]
    fn test_level_order_walks_levels_left_to_right() {
        GhostToken::new(|mut token| {
            let mut heap = BrandedTreeHeap::new();
            heap.extend_from(&mut token, [4, 5, 6, 7, 1]).unwrap();
            //        1
            //      4   6
            //     7 5
            let order: Vec<_> = heap.iter(&token).copied().collect();
            assert_eq!(order, vec![1, 4, 6, 7, 5]);
            assert_eq!(heap.iter(&token).len(), 5);
        });
    }

    #[test]
    fn test_level_order_empty() {
        GhostToken::new(|token| {
            let heap: BrandedTreeHeap<'_, i32> = BrandedTreeHeap::new();
            assert_eq!(heap.iter(&token).next(), None);
        });
    }
}
