//! Distance metrics for nearest-neighbor queries.
//!
//! A metric must be symmetric and non-negative. It must be zero only for identical points.
//! Two further properties are relied on by the search:
//!
//! - **Axis-dominating**: the distance between two points is never smaller than the absolute
//!   difference of their coordinates on any single axis. Subtrees are pruned by comparing that
//!   per-axis gap against the current worst candidate. Squared Euclidean distance, for example,
//!   breaks this for gaps below 1.
//! - **Homogeneous along the first axis**: radius-bounded queries convert a scalar radius `r`
//!   into the metric's own units by measuring `distance(origin, origin + r * e0)`, where `e0`
//!   is the first axis. A metric that doesn't scale this way (for example a great-circle
//!   distance over lon/lat) will give radius-bounded results that don't correspond to `r`.
//!
//! All metrics in this module satisfy both. Any closure `Fn(&P, &P) -> f64` is a metric:
//!
//! ```
//! use kd_index::kdtree::{KDTree, KDTreeIndex};
//!
//! let tree = KDTree::build(vec![[0.0f64, 0.0], [3.0, 4.0]]).unwrap();
//! // Euclidean, with the y axis stretched by a factor of 2
//! let stretched =
//!     |a: &[f64; 2], b: &[f64; 2]| ((a[0] - b[0]).powi(2) + 4.0 * (a[1] - b[1]).powi(2)).sqrt();
//! let found = tree.nearest(&[2.5, 3.0], 1, &stretched).unwrap();
//! assert_eq!(found, vec![&[3.0, 4.0]]);
//! ```

use crate::point::Point;
use num_traits::ToPrimitive;

/// A trait for calculating the distance between two points of the same type.
pub trait DistanceMetric<P: Point + ?Sized> {
    /// The distance between `a` and `b`.
    fn distance(&self, a: &P, b: &P) -> f64;
}

impl<P, F> DistanceMetric<P> for F
where
    P: Point + ?Sized,
    F: Fn(&P, &P) -> f64,
{
    #[inline]
    fn distance(&self, a: &P, b: &P) -> f64 {
        self(a, b)
    }
}

/// Per-axis absolute differences of two points, as `f64`.
///
/// Only the shared leading axes are visited.
#[inline]
fn axis_deltas<'a, P: Point + ?Sized>(a: &'a P, b: &'a P) -> impl Iterator<Item = f64> + 'a {
    (0..a.dim().min(b.dim())).map(move |axis| {
        let x = a.coord(axis).to_f64().unwrap_or(f64::NAN);
        let y = b.coord(axis).to_f64().unwrap_or(f64::NAN);
        (x - y).abs()
    })
}

/// Euclidean (L2) distance.
///
/// This is the standard straight-line distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl<P: Point + ?Sized> DistanceMetric<P> for EuclideanDistance {
    #[inline]
    fn distance(&self, a: &P, b: &P) -> f64 {
        axis_deltas(a, b).map(|d| d * d).sum::<f64>().sqrt()
    }
}

/// Manhattan (L1) distance: the sum of the absolute per-axis differences.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanDistance;

impl<P: Point + ?Sized> DistanceMetric<P> for ManhattanDistance {
    #[inline]
    fn distance(&self, a: &P, b: &P) -> f64 {
        axis_deltas(a, b).sum()
    }
}

/// Chebyshev (L-infinity) distance: the largest absolute per-axis difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChebyshevDistance;

impl<P: Point + ?Sized> DistanceMetric<P> for ChebyshevDistance {
    #[inline]
    fn distance(&self, a: &P, b: &P) -> f64 {
        axis_deltas(a, b).fold(0.0, f64::max)
    }
}
