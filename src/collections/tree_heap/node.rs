//! Node layout and the pointer-surgery primitive.
//!
//! A node has three legs: `parent`, `left` and `right`. Children are owned by
//! exactly one parent slot; `parent` is a plain back-reference used for
//! navigation and rollback, never for ownership.

use crate::alloc::NodePool;

/// A heap node stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TreeNode<T> {
    pub(crate) value: T,
    pub(crate) parent: Option<usize>,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
}

impl<T> TreeNode<T> {
    /// A node with no links.
    pub(crate) const fn detached(value: T) -> Self {
        Self {
            value,
            parent: None,
            left: None,
            right: None,
        }
    }
}

/// Which child slot of a parent a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

pub(crate) type Nodes<T> = NodePool<TreeNode<T>>;

/// Returns the side of `parent` that holds `child`, if `child` is a direct child.
#[inline]
pub(crate) fn side_of<T>(nodes: &Nodes<T>, parent: usize, child: usize) -> Option<Side> {
    let node = &nodes[parent];
    if node.left == Some(child) {
        Some(Side::Left)
    } else if node.right == Some(child) {
        Some(Side::Right)
    } else {
        None
    }
}

/// Points `parent`'s `side` slot at `child`. Does not touch `child.parent`.
#[inline]
pub(crate) fn set_child<T>(nodes: &mut Nodes<T>, parent: usize, side: Side, child: Option<usize>) {
    let node = &mut nodes[parent];
    match side {
        Side::Left => node.left = child,
        Side::Right => node.right = child,
    }
}

/// Moves `child` into `node`'s position and `node` directly beneath it.
///
/// `child` keeps `node` on the side it came from and inherits `node`'s other
/// subtree; `node` inherits `child`'s former children. Every affected parent
/// link is rewritten, values are never touched.
///
/// Returns `false` (and does nothing) if `child` is not a direct child of `node`.
/// Calling `exchange(nodes, child, node)` right after a successful call restores
/// the previous links exactly.
pub(crate) fn exchange<T>(nodes: &mut Nodes<T>, node: usize, child: usize) -> bool {
    let Some(side) = side_of(nodes, node, child) else {
        return false;
    };

    let (grand, node_left, node_right) = {
        let n = &nodes[node];
        (n.parent, n.left, n.right)
    };
    let (child_left, child_right) = {
        let c = &nodes[child];
        (c.left, c.right)
    };

    {
        let c = &mut nodes[child];
        c.parent = grand;
        match side {
            Side::Left => {
                c.left = Some(node);
                c.right = node_right;
            }
            Side::Right => {
                c.left = node_left;
                c.right = Some(node);
            }
        }
    }
    {
        let n = &mut nodes[node];
        n.parent = Some(child);
        n.left = child_left;
        n.right = child_right;
    }

    let sibling = match side {
        Side::Left => node_right,
        Side::Right => node_left,
    };
    if let Some(sibling) = sibling {
        nodes[sibling].parent = Some(child);
    }
    for grandchild in [child_left, child_right].into_iter().flatten() {
        nodes[grandchild].parent = Some(node);
    }
    if let Some(grand) = grand {
        let g = &mut nodes[grand];
        if g.left == Some(node) {
            g.left = Some(child);
        } else {
            g.right = Some(child);
        }
    }
    true
}
