use std::cmp::Ordering;

use tracing::debug;

use crate::error::{KdIndexError, Result};
use crate::kdtree::index::{split_axis, Node};
use crate::kdtree::KDTree;
use crate::point::Point;

/// A builder to create a [`KDTree`].
///
/// ```
/// use kd_index::kdtree::{KDTreeBuilder, KDTreeIndex};
///
/// let mut builder = KDTreeBuilder::with_capacity(3);
/// builder.add(vec![2.0, 3.0]).unwrap();
/// builder.add(vec![5.0, 4.0]).unwrap();
/// builder.add(vec![9.0, 6.0]).unwrap();
/// let tree = builder.finish().unwrap();
/// assert_eq!(tree.num_items(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct KDTreeBuilder<P> {
    points: Vec<P>,
    dim: Option<usize>,
}

impl<P: Point> KDTreeBuilder<P> {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new builder with room for `num_items` points before reallocating.
    pub fn with_capacity(num_items: usize) -> Self {
        Self {
            points: Vec::with_capacity(num_items),
            dim: None,
        }
    }

    /// Add a point to the index, returning its insertion index.
    ///
    /// The first point added fixes the dimension of the tree. Any later point with a different
    /// dimension is rejected with [`KdIndexError::DimensionMismatch`].
    pub fn add(&mut self, point: P) -> Result<usize> {
        let found = point.dim();
        match self.dim {
            Some(expected) if expected != found => {
                return Err(KdIndexError::DimensionMismatch { expected, found });
            }
            Some(_) => {}
            None => self.dim = Some(found),
        }

        let index = self.points.len();
        self.points.push(point);
        Ok(index)
    }

    /// The number of points added so far.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no points have been added.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consume this builder, performing the median split and generating a KDTree ready for
    /// queries.
    pub fn finish(self) -> Result<KDTree<P>> {
        let num_items = self.points.len();
        let dim = self.dim.unwrap_or(0);
        let root = build_node(self.points, 0)?;

        debug!(num_items, dim, "built kd-tree");

        Ok(KDTree {
            root,
            num_items,
            dim,
        })
    }
}

impl<P: Point> Default for KDTreeBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursively place `points` under a node at `depth`.
///
/// Points are stable-sorted on the axis for this depth and the positional median becomes the
/// node. The halves on either side of it become the left and right subtrees.
fn build_node<P: Point>(mut points: Vec<P>, depth: usize) -> Result<Option<Box<Node<P>>>> {
    let Some(last) = points.last() else {
        return Ok(None);
    };

    // zero-dimensional points are all alike, so there is nothing to sort on
    if let Some(axis) = split_axis(depth, last.dim()) {
        points.sort_by(|a, b| by_axis(a, b, axis));
    }

    let median = points.len() / 2;
    if points.len() == 1 {
        return Ok(points.pop().map(|value| Box::new(Node::leaf(value))));
    }

    // the ends of the sorted slice must agree with the median
    let expected = points[median].dim();
    for end in [&points[0], &points[points.len() - 1]] {
        if end.dim() != expected {
            return Err(KdIndexError::DimensionMismatch {
                expected,
                found: end.dim(),
            });
        }
    }

    let right_points = points.split_off(median + 1);
    let Some(value) = points.pop() else {
        return Ok(None);
    };

    let left = build_node(points, depth + 1)?;
    let right = build_node(right_points, depth + 1)?;

    Ok(Some(Box::new(Node { value, left, right })))
}

#[inline]
fn by_axis<P: Point>(a: &P, b: &P, axis: usize) -> Ordering {
    a.coord(axis)
        .partial_cmp(&b.coord(axis))
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_has_no_root() {
        let tree = KDTreeBuilder::<[f64; 2]>::new().finish().unwrap();
        assert!(tree.root.is_none());
        assert_eq!(tree.num_items, 0);
    }

    #[test]
    fn add_returns_insertion_index() {
        let mut builder = KDTreeBuilder::new();
        assert_eq!(builder.add(vec![1, 2]).unwrap(), 0);
        assert_eq!(builder.add(vec![3, 4]).unwrap(), 1);
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn add_rejects_mismatched_dimension() {
        let mut builder = KDTreeBuilder::new();
        builder.add(vec![1.0, 2.0]).unwrap();
        let err = builder.add(vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            KdIndexError::DimensionMismatch {
                expected: 2,
                found: 3
            }
        );
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn median_split_shape() {
        // sorted on x: 1, 2, 3, 4, 5 -> median 3 at the root
        let points = vec![[4, 0], [1, 0], [5, 0], [3, 0], [2, 0]];
        let root = build_node(points, 0).unwrap().unwrap();
        assert_eq!(root.value, [3, 0]);

        // left [1, 2] sorted on y (all equal, stable) -> median index 1 is [2, 0]
        let left = root.left.as_ref().unwrap();
        assert_eq!(left.value, [2, 0]);
        assert_eq!(left.left.as_ref().unwrap().value, [1, 0]);
        assert!(left.right.is_none());

        let right = root.right.as_ref().unwrap();
        assert_eq!(right.value, [5, 0]);
        assert_eq!(right.left.as_ref().unwrap().value, [4, 0]);
    }

    #[test]
    fn split_sizes_are_balanced() {
        fn count<P>(node: &Option<Box<Node<P>>>) -> usize {
            node.as_ref()
                .map_or(0, |n| 1 + count(&n.left) + count(&n.right))
        }

        let points: Vec<[i32; 1]> = (0..10).rev().map(|i| [i]).collect();
        let root = build_node(points, 0).unwrap().unwrap();
        assert_eq!(count(&root.left), 5);
        assert_eq!(count(&root.right), 4);
    }

    #[test]
    fn build_node_detects_inconsistent_ends() {
        // Vec points of different length; axis 0 exists on both.
        let points = vec![vec![1.0], vec![2.0, 0.0], vec![3.0, 0.0]];
        let err = build_node(points, 0).unwrap_err();
        assert!(matches!(err, KdIndexError::DimensionMismatch { .. }));
    }
}
