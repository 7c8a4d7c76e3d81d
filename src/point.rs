//! The point capability required of anything stored in a [`KDTree`][crate::kdtree::KDTree].

use crate::r#type::{Coord, IndexableNum};

/// A point in a fixed-dimension numeric space.
///
/// Every point stored in one tree must report the same [`dim`][Point::dim]. Coordinates are
/// addressed by axis, `0 <= axis < dim`.
pub trait Point {
    /// The scalar type of each coordinate.
    type Num: IndexableNum;

    /// The number of coordinates of this point.
    fn dim(&self) -> usize;

    /// Read the coordinate at `axis`.
    ///
    /// # Panics
    ///
    /// May panic if `axis >= self.dim()`, in the same way slice indexing does.
    fn coord(&self, axis: usize) -> Self::Num;

    /// Mutable access to the coordinate at `axis`.
    ///
    /// # Panics
    ///
    /// May panic if `axis >= self.dim()`.
    fn coord_mut(&mut self, axis: usize) -> &mut Self::Num;

    /// A point of dimension `dim` with every coordinate set to zero.
    ///
    /// Fixed-size point types may ignore `dim`.
    fn origin(dim: usize) -> Self
    where
        Self: Sized;
}

impl<N: IndexableNum, const D: usize> Point for [N; D] {
    type Num = N;

    #[inline]
    fn dim(&self) -> usize {
        D
    }

    #[inline]
    fn coord(&self, axis: usize) -> N {
        self[axis]
    }

    #[inline]
    fn coord_mut(&mut self, axis: usize) -> &mut N {
        &mut self[axis]
    }

    fn origin(_dim: usize) -> Self {
        [N::zero(); D]
    }
}

impl<N: IndexableNum> Point for Vec<N> {
    type Num = N;

    #[inline]
    fn dim(&self) -> usize {
        self.len()
    }

    #[inline]
    fn coord(&self, axis: usize) -> N {
        self[axis]
    }

    #[inline]
    fn coord_mut(&mut self, axis: usize) -> &mut N {
        &mut self[axis]
    }

    fn origin(dim: usize) -> Self {
        vec![N::zero(); dim]
    }
}

impl<N: IndexableNum> Point for Coord<N> {
    type Num = N;

    #[inline]
    fn dim(&self) -> usize {
        2
    }

    #[inline]
    fn coord(&self, axis: usize) -> N {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid index of coord"),
        }
    }

    #[inline]
    fn coord_mut(&mut self, axis: usize) -> &mut N {
        match axis {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Invalid index of coord"),
        }
    }

    fn origin(_dim: usize) -> Self {
        Coord::new(N::zero(), N::zero())
    }
}

#[cfg(feature = "use-geo_0_31")]
impl<N: IndexableNum> Point for geo_0_31::Coord<N> {
    type Num = N;

    #[inline]
    fn dim(&self) -> usize {
        2
    }

    #[inline]
    fn coord(&self, axis: usize) -> N {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid index of coord"),
        }
    }

    #[inline]
    fn coord_mut(&mut self, axis: usize) -> &mut N {
        match axis {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Invalid index of coord"),
        }
    }

    fn origin(_dim: usize) -> Self {
        geo_0_31::Coord {
            x: N::zero(),
            y: N::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_origin_has_requested_dimension() {
        let origin = <Vec<i32> as Point>::origin(3);
        assert_eq!(origin, vec![0, 0, 0]);
        assert_eq!(origin.dim(), 3);
    }

    #[test]
    fn array_coords_are_writable() {
        let mut p = <[f32; 3] as Point>::origin(3);
        *p.coord_mut(2) = 4.5;
        assert_eq!(p.coord(2), 4.5);
        assert_eq!(p, [0.0, 0.0, 4.5]);
    }

    #[test]
    fn coord_axes() {
        let mut c = Coord::new(1u16, 2u16);
        assert_eq!(c.dim(), 2);
        *c.coord_mut(0) = 7;
        assert_eq!((c.coord(0), c.coord(1)), (7, 2));
    }
}
