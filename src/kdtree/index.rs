use crate::error::Result;
use crate::kdtree::KDTreeBuilder;
use crate::point::Point;

/// One point placed in the tree.
///
/// Points on the `left` have a coordinate at this node's split axis less than or equal to
/// `value`'s. Points on the `right` have a strictly greater one.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<P> {
    pub(crate) value: P,
    pub(crate) left: Option<Box<Node<P>>>,
    pub(crate) right: Option<Box<Node<P>>>,
}

impl<P> Node<P> {
    pub(crate) fn leaf(value: P) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// The point stored at this node.
    pub fn value(&self) -> &P {
        &self.value
    }

    /// The subtree whose points are at most this node's coordinate on its split axis.
    pub fn left(&self) -> Option<&Node<P>> {
        self.left.as_deref()
    }

    /// The subtree whose points are greater than this node's coordinate on its split axis.
    pub fn right(&self) -> Option<&Node<P>> {
        self.right.as_deref()
    }

    /// A node is a leaf when it has no left child. The median split only ever leaves `left`
    /// empty for single-point slices, so a leaf never has a right child either.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none()
    }
}

/// The axis a node at `depth` splits on, or `None` for zero-dimensional points.
#[inline]
pub(crate) fn split_axis(depth: usize, dim: usize) -> Option<usize> {
    depth.checked_rem(dim)
}

/// An immutable k-d tree over points of a single dimension.
///
/// Usually this will be created via [`KDTree::build`] or a
/// [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder]. Queries are provided by the
/// [`KDTreeIndex`][crate::kdtree::KDTreeIndex] trait.
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<P> {
    pub(crate) root: Option<Box<Node<P>>>,
    pub(crate) num_items: usize,
    pub(crate) dim: usize,
}

impl<P: Point> KDTree<P> {
    /// Build a tree from a collection of points.
    ///
    /// An empty collection produces an empty tree. Fails with
    /// [`DimensionMismatch`][crate::KdIndexError::DimensionMismatch] if any two points report
    /// different dimensions.
    pub fn build(points: impl IntoIterator<Item = P>) -> Result<Self> {
        let points = points.into_iter();
        let mut builder = KDTreeBuilder::with_capacity(points.size_hint().0);
        for point in points {
            builder.add(point)?;
        }
        builder.finish()
    }

    /// Consume the tree, returning its points in depth-first (pre-order) order.
    pub fn into_points(self) -> Vec<P> {
        let mut points = Vec::with_capacity(self.num_items);
        let mut stack: Vec<Box<Node<P>>> = self.root.into_iter().collect();
        while let Some(node) = stack.pop() {
            let Node { value, left, right } = *node;
            points.push(value);
            stack.extend(right);
            stack.extend(left);
        }
        points
    }
}

impl<P> Default for KDTree<P> {
    fn default() -> Self {
        Self {
            root: None,
            num_items: 0,
            dim: 0,
        }
    }
}
