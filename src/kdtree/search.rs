//! Branch-and-bound k-nearest-neighbor search over the boxed node tree.

use crate::kdtree::index::{split_axis, Node};
use crate::metric::DistanceMetric;
use crate::point::Point;
use crate::r#type::IndexableNum;

/// A point found by a nearest-neighbor query, together with its distance from the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a, P> {
    /// The stored point.
    pub point: &'a P,
    /// The distance from the query point to [`point`][Self::point], in the metric's units.
    pub distance: f64,
}

/// Parameters shared by every level of one query.
pub(crate) struct Search<'q, P, M> {
    pub(crate) query: &'q P,
    pub(crate) k: usize,
    /// The radius already converted to the metric's units, `None` when unbounded.
    pub(crate) max_distance: Option<f64>,
    pub(crate) metric: &'q M,
}

impl<'q, P: Point, M: DistanceMetric<P>> Search<'q, P, M> {
    /// Collect up to `k` candidates from the subtree rooted at `node`, sorted ascending by
    /// distance and all within the radius.
    ///
    /// `node` is at `depth` in the tree, which determines its split axis.
    pub(crate) fn run<'a>(&self, node: &'a Node<P>, depth: usize) -> Vec<Neighbor<'a, P>> {
        let current = Neighbor {
            point: &node.value,
            distance: self.metric.distance(self.query, &node.value),
        };
        let within_radius = self
            .max_distance
            .map_or(true, |max_distance| current.distance < max_distance);

        if node.is_leaf() {
            return if within_radius {
                vec![current]
            } else {
                vec![]
            };
        }

        // go left when the query is at most the node's coordinate on this axis
        let (preferred, other, axis_gap) = match split_axis(depth, self.query.dim()) {
            Some(axis) => {
                let q = self.query.coord(axis);
                let v = node.value.coord(axis);
                let gap = q.abs_diff_f64(v);
                if q <= v {
                    (&node.left, &node.right, gap)
                } else {
                    (&node.right, &node.left, gap)
                }
            }
            None => (&node.left, &node.right, 0.0),
        };

        let mut nearest = match preferred {
            Some(child) => self.run(child, depth + 1),
            None => Vec::new(),
        };

        if let Some(other) = other {
            let best = if nearest.len() >= self.k {
                nearest.last().map_or(f64::INFINITY, |n| n.distance)
            } else {
                f64::INFINITY
            };

            // The other side can only hold something closer if the splitting plane is nearer
            // than the current worst candidate. A starved search explores it regardless.
            let plane_in_reach = axis_gap < best;
            let starved = nearest.len() + depth < self.k;

            if plane_in_reach || starved {
                nearest.extend(self.run(other, depth + 1));
                nearest.sort_by(|a, b| a.distance.total_cmp(&b.distance));
                nearest.truncate(self.k);
            }
        }

        if within_radius {
            self.insert(&mut nearest, current);
        }
        nearest
    }

    /// Insert `candidate` at its lower-bound position if there is room for it or if it beats the
    /// current worst entry, keeping at most `k` entries.
    fn insert<'a>(&self, nearest: &mut Vec<Neighbor<'a, P>>, candidate: Neighbor<'a, P>) {
        let improves = nearest
            .last()
            .map_or(true, |worst| candidate.distance < worst.distance);
        if nearest.len() >= self.k && !improves {
            return;
        }

        let pos = nearest.partition_point(|n| n.distance < candidate.distance);
        nearest.insert(pos, candidate);
        nearest.truncate(self.k);
    }
}
