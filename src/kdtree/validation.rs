//! Structural validation of a built [`KDTree`].
//!
//! Walks the whole tree and counts violations of the ordering and dimension invariants. This is
//! meant for tests and debugging; queries never call it.

use tinyvec::TinyVec;

use crate::kdtree::index::{split_axis, Node};
use crate::kdtree::KDTree;
use crate::point::Point;

/// Detailed validation report for a [`KDTree`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Number of nodes reachable from the root.
    pub num_nodes: usize,
    /// Number of items the tree claims to hold.
    pub num_items: usize,
    /// Length of the longest root-to-leaf path, in nodes.
    pub height: usize,

    /// Points whose dimension differs from the tree's.
    pub inconsistent_dimensions: usize,
    /// Points in some node's left subtree with a greater coordinate on that node's axis.
    pub misplaced_left: usize,
    /// Points in some node's right subtree with a smaller coordinate on that node's axis.
    pub misplaced_right: usize,
    /// Nodes with a right child but no left child. Search treats these as leaves, so the right
    /// subtree would never be visited.
    pub unreachable_right_children: usize,

    /// Points in some node's right subtree that tie with that node on its axis.
    ///
    /// The median split produces these when several points share a coordinate. They don't
    /// affect search results.
    pub ties_on_right: usize,
    /// Points equal to a point stored at another node. Duplicates are allowed.
    pub duplicate_points: usize,
}

impl ValidationReport {
    /// Check the invariants that search correctness depends on.
    ///
    /// Ties on the right and duplicate points are reported but tolerated.
    pub fn is_valid(&self) -> bool {
        self.num_nodes == self.num_items
            && self.inconsistent_dimensions == 0
            && self.misplaced_left == 0
            && self.misplaced_right == 0
            && self.unreachable_right_children == 0
    }
}

/// An ancestor a point must be ordered against, and whether the point lies on its left.
type Constraint<'a, P> = (Option<&'a Node<P>>, usize, bool);

impl<P: Point + PartialEq> KDTree<P> {
    /// Walk every node and report violations of the tree invariants.
    ///
    /// Every point is checked against every ancestor, not only its parent. Duplicate detection
    /// is quadratic in the number of points.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport {
            num_items: self.num_items,
            ..Default::default()
        };
        let mut seen: Vec<&P> = Vec::with_capacity(self.num_items);
        let mut ancestors: TinyVec<[Constraint<'_, P>; 32]> = TinyVec::new();

        if let Some(root) = self.root.as_deref() {
            self.validate_node(root, 0, &mut ancestors, &mut seen, &mut report);
        }
        report
    }

    fn validate_node<'a>(
        &self,
        node: &'a Node<P>,
        depth: usize,
        ancestors: &mut TinyVec<[Constraint<'a, P>; 32]>,
        seen: &mut Vec<&'a P>,
        report: &mut ValidationReport,
    ) {
        report.num_nodes += 1;
        report.height = report.height.max(depth + 1);

        let value = &node.value;
        if value.dim() != self.dim {
            report.inconsistent_dimensions += 1;
        } else {
            for &(ancestor, axis, on_left) in ancestors.iter() {
                let Some(ancestor) = ancestor else {
                    continue;
                };
                let split = ancestor.value.coord(axis);
                let coord = value.coord(axis);
                if on_left && coord > split {
                    report.misplaced_left += 1;
                } else if !on_left && coord < split {
                    report.misplaced_right += 1;
                } else if !on_left && coord == split {
                    report.ties_on_right += 1;
                }
            }
        }

        if seen.contains(&value) {
            report.duplicate_points += 1;
        }
        seen.push(value);

        if node.left.is_none() && node.right.is_some() {
            report.unreachable_right_children += 1;
        }

        let axis = match split_axis(depth, self.dim) {
            Some(axis) if value.dim() == self.dim => axis,
            // nothing to order children against
            _ => {
                for child in [node.left(), node.right()].into_iter().flatten() {
                    self.validate_node(child, depth + 1, ancestors, seen, report);
                }
                return;
            }
        };

        if let Some(left) = node.left() {
            ancestors.push((Some(node), axis, true));
            self.validate_node(left, depth + 1, ancestors, seen, report);
            ancestors.pop();
        }
        if let Some(right) = node.right() {
            ancestors.push((Some(node), axis, false));
            self.validate_node(right, depth + 1, ancestors, seen, report);
            ancestors.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_valid() {
        let tree: KDTree<[f64; 2]> = KDTree::build(vec![]).unwrap();
        let report = tree.validate();
        assert!(report.is_valid());
        assert_eq!(report.num_nodes, 0);
        assert_eq!(report.height, 0);
    }

    #[test]
    fn built_tree_is_valid() {
        let points: Vec<[i32; 3]> = (0..50)
            .map(|i| [(i * 37) % 101, (i * 53) % 89, (i * 11) % 7])
            .collect();
        let tree = KDTree::build(points).unwrap();
        let report = tree.validate();

        assert!(report.is_valid(), "{report:?}");
        assert_eq!(report.num_nodes, 50);
        assert_eq!(report.duplicate_points, 0);
        // 50 points split by the median have height ceil(log2(51))
        assert_eq!(report.height, 6);
    }

    #[test]
    fn duplicates_are_reported_not_rejected() {
        let tree = KDTree::build(vec![[1, 1], [1, 1], [2, 2]]).unwrap();
        let report = tree.validate();
        assert!(report.is_valid());
        assert_eq!(report.num_nodes, 3);
        assert_eq!(report.duplicate_points, 1);
    }

    #[test]
    fn detects_misplaced_descendants() {
        // the grandchild sits left of the root on axis 0 but lies to its right
        let tree = KDTree {
            root: Some(Box::new(Node {
                value: [5, 5],
                left: Some(Box::new(Node {
                    value: [3, 5],
                    left: Some(Box::new(Node::leaf([9, 1]))),
                    right: None,
                })),
                right: Some(Box::new(Node::leaf([7, 0]))),
            })),
            num_items: 4,
            dim: 2,
        };
        let report = tree.validate();

        assert!(!report.is_valid());
        assert_eq!(report.misplaced_left, 1);
        assert_eq!(report.misplaced_right, 0);
    }

    #[test]
    fn detects_unreachable_right_child() {
        let tree = KDTree {
            root: Some(Box::new(Node {
                value: [5, 5],
                left: None,
                right: Some(Box::new(Node::leaf([7, 0]))),
            })),
            num_items: 2,
            dim: 2,
        };
        let report = tree.validate();
        assert!(!report.is_valid());
        assert_eq!(report.unreachable_right_children, 1);
    }
}
