//! Utilities to traverse the KDTree structure.

use crate::kdtree::index::{split_axis, Node};
use crate::point::Point;

/// A node in the KDTree, seen from a particular depth.
///
/// Unlike [`Node`], this knows how deep it sits in the tree and therefore which axis its
/// children are split over.
#[derive(Debug)]
pub struct NodeRef<'a, P> {
    node: &'a Node<P>,
    depth: usize,
}

impl<P> Clone for NodeRef<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for NodeRef<'_, P> {}

impl<'a, P: Point> NodeRef<'a, P> {
    pub(crate) fn from_root(node: &'a Node<P>) -> Self {
        Self { node, depth: 0 }
    }

    /// The point stored at this node.
    pub fn value(&self) -> &'a P {
        &self.node.value
    }

    /// The depth of this node. The root is at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The axis that the children of this node are split over, `depth mod dim`.
    ///
    /// `None` only for zero-dimensional points.
    pub fn axis(&self) -> Option<usize> {
        split_axis(self.depth, self.node.value.dim())
    }

    /// The child node holding points at most this node's coordinate on [`axis`][Self::axis].
    pub fn left_child(&self) -> Option<NodeRef<'a, P>> {
        self.node.left().map(|node| Self {
            node,
            depth: self.depth + 1,
        })
    }

    /// The child node holding points greater than this node's coordinate on
    /// [`axis`][Self::axis].
    pub fn right_child(&self) -> Option<NodeRef<'a, P>> {
        self.node.right().map(|node| Self {
            node,
            depth: self.depth + 1,
        })
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }
}
