use std::cmp::Ordering;

use num_traits::{ToPrimitive, Zero};
use tracing::trace;

use crate::error::{KdIndexError, Result};
use crate::kdtree::index::Node;
use crate::kdtree::search::{Neighbor, Search};
use crate::kdtree::traversal::NodeRef;
use crate::kdtree::KDTree;
use crate::metric::DistanceMetric;
use crate::point::Point;
use crate::r#type::{Coord, IndexableNum};

/// A trait for searching and accessing data out of a KDTree.
pub trait KDTreeIndex<P: Point>: Sized {
    /// The root node of the tree, or `None` if the tree holds no points.
    fn root_node(&self) -> Option<&Node<P>>;

    /// The number of items in this KDTree
    fn num_items(&self) -> usize;

    /// The dimension shared by every point in this KDTree. `0` for an empty tree.
    fn dim(&self) -> usize;

    /// Returns `true` if the tree holds no points.
    fn is_empty(&self) -> bool {
        self.num_items() == 0
    }

    /// Search items in order of distance from the given point.
    ///
    /// Returns at most `k` neighbors sorted ascending by distance. When `max_radius` is given,
    /// only points strictly within it are returned. The radius is converted to the metric's
    /// units by measuring from the origin to a point `max_radius` along the first axis, so
    /// `metric` must be homogeneous along that axis (see [`crate::metric`]).
    ///
    /// ```
    /// use kd_index::kdtree::{KDTree, KDTreeIndex};
    /// use kd_index::metric::EuclideanDistance;
    ///
    /// let tree = KDTree::build(vec![[0., 0.], [1., 1.], [4., 4.]]).unwrap();
    ///
    /// let results = tree.neighbors(&[5., 5.], 2, None, &EuclideanDistance).unwrap();
    /// assert_eq!(results[0].point, &[4., 4.]);
    /// assert_eq!(results[1].point, &[1., 1.]);
    /// ```
    ///
    /// # Errors
    ///
    /// - [`KdIndexError::InvalidRadius`] if `max_radius` is not strictly positive.
    /// - [`KdIndexError::DimensionMismatch`] if `query` doesn't have the tree's dimension.
    fn neighbors(
        &self,
        query: &P,
        k: usize,
        max_radius: Option<P::Num>,
        metric: &impl DistanceMetric<P>,
    ) -> Result<Vec<Neighbor<'_, P>>> {
        // NaN is not a valid radius either
        let zero = <P::Num as Zero>::zero();
        if max_radius.is_some_and(|r| r.partial_cmp(&zero) != Some(Ordering::Greater)) {
            return Err(KdIndexError::InvalidRadius);
        }

        let Some(root) = self.root_node() else {
            return Ok(vec![]);
        };
        if k == 0 {
            return Ok(vec![]);
        }

        if query.dim() != self.dim() {
            return Err(KdIndexError::DimensionMismatch {
                expected: self.dim(),
                found: query.dim(),
            });
        }

        let max_distance = max_radius.map(|r| match query.dim() {
            0 => r.to_f64().unwrap_or(f64::INFINITY),
            dim => {
                let origin = P::origin(dim);
                let mut surface = P::origin(dim);
                *surface.coord_mut(0) = r;
                metric.distance(&origin, &surface)
            }
        });

        let search = Search {
            query,
            k,
            max_distance,
            metric,
        };
        let results = search.run(root, 0);

        trace!(
            k,
            ?max_distance,
            num_results = results.len(),
            "nearest-neighbor query"
        );
        Ok(results)
    }

    /// Find the `k` points nearest to `query`, nearest first.
    ///
    /// If the tree has fewer than `k` points, all of them are returned.
    ///
    /// # Errors
    ///
    /// [`KdIndexError::DimensionMismatch`] if `query` doesn't have the tree's dimension.
    fn nearest(&self, query: &P, k: usize, metric: &impl DistanceMetric<P>) -> Result<Vec<&P>> {
        let neighbors = self.neighbors(query, k, None, metric)?;
        Ok(neighbors.into_iter().map(|n| n.point).collect())
    }

    /// Find the `k` points nearest to `query` that lie strictly within `radius`, nearest first.
    ///
    /// Fewer than `k` points are returned when fewer lie within the radius.
    ///
    /// # Errors
    ///
    /// - [`KdIndexError::InvalidRadius`] if `radius` is not strictly positive. This is checked
    ///   before anything else, even on an empty tree.
    /// - [`KdIndexError::DimensionMismatch`] if `query` doesn't have the tree's dimension.
    fn nearest_within(
        &self,
        query: &P,
        radius: P::Num,
        k: usize,
        metric: &impl DistanceMetric<P>,
    ) -> Result<Vec<&P>> {
        let neighbors = self.neighbors(query, k, Some(radius), metric)?;
        Ok(neighbors.into_iter().map(|n| n.point).collect())
    }

    /// Access the root node of the KDTree for manual traversal.
    fn root(&self) -> Option<NodeRef<'_, P>> {
        self.root_node().map(NodeRef::from_root)
    }
}

impl<P: Point> KDTreeIndex<P> for KDTree<P> {
    fn root_node(&self) -> Option<&Node<P>> {
        self.root.as_deref()
    }

    fn num_items(&self) -> usize {
        self.num_items
    }

    fn dim(&self) -> usize {
        self.dim
    }
}

impl<N: IndexableNum> KDTree<Coord<N>> {
    /// Find the `k` points nearest to any [`CoordTrait`][geo_traits::CoordTrait] implementor.
    pub fn nearest_coord(
        &self,
        coord: &impl geo_traits::CoordTrait<T = N>,
        k: usize,
        metric: &impl DistanceMetric<Coord<N>>,
    ) -> Result<Vec<&Coord<N>>> {
        self.nearest(&Coord::from_coord(coord), k, metric)
    }
}
