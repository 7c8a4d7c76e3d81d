use std::fmt::Debug;

use num_traits::{Bounded, Num, NumCast, ToPrimitive};

/// A trait for types that can be used for indexed coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Every implementor is a
/// primitive number that converts losslessly enough to `f64` for the axis-gap test used while
/// pruning.
pub trait IndexableNum:
    private::Sealed
    + Num
    + NumCast
    + ToPrimitive
    + PartialOrd
    + Copy
    + Debug
    + Send
    + Sync
    + Bounded
{
    /// The absolute difference of two values, as `f64`.
    ///
    /// Computed without subtracting in `Self` so that unsigned types don't underflow.
    #[inline]
    fn abs_diff_f64(self, other: Self) -> f64 {
        let a = self.to_f64().unwrap_or(f64::NAN);
        let b = other.to_f64().unwrap_or(f64::NAN);
        (a - b).abs()
    }
}

impl IndexableNum for i8 {}
impl IndexableNum for u8 {}
impl IndexableNum for i16 {}
impl IndexableNum for u16 {}
impl IndexableNum for i32 {}
impl IndexableNum for u32 {}
impl IndexableNum for i64 {}
impl IndexableNum for u64 {}
impl IndexableNum for f32 {}
impl IndexableNum for f64 {}

/// A simple 2D coordinate.
///
/// This implements both [`Point`][crate::Point], so it can be stored in a
/// [`KDTree`][crate::kdtree::KDTree], and [`geo_traits::CoordTrait`], so it interoperates with
/// the rest of the geo ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord<N: IndexableNum> {
    pub x: N,
    pub y: N,
}

impl<N: IndexableNum> Coord<N> {
    /// Create a new coordinate.
    pub fn new(x: N, y: N) -> Self {
        Self { x, y }
    }

    /// Copy any [`CoordTrait`][geo_traits::CoordTrait] implementor into a [`Coord`].
    pub fn from_coord(coord: &impl geo_traits::CoordTrait<T = N>) -> Self {
        Self {
            x: coord.x(),
            y: coord.y(),
        }
    }
}

impl<N: IndexableNum> geo_traits::CoordTrait for Coord<N> {
    type T = N;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.x,
            1 => self.y,
            _ => panic!("Coord only supports 2 dimensions"),
        }
    }

    fn x(&self) -> Self::T {
        self.x
    }

    fn y(&self) -> Self::T {
        self.y
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for u16 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for i64 {}
    impl Sealed for u64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_traits::CoordTrait;

    #[test]
    fn abs_diff_does_not_underflow_unsigned() {
        assert_eq!(3u8.abs_diff_f64(10u8), 7.0);
        assert_eq!(10u8.abs_diff_f64(3u8), 7.0);
        assert_eq!((-2i32).abs_diff_f64(5), 7.0);
    }

    #[test]
    fn coord_trait_accessors() {
        let coord = Coord::new(1.5f64, -2.0);
        assert_eq!(coord.x(), 1.5);
        assert_eq!(coord.nth_or_panic(1), -2.0);
        assert_eq!(Coord::from_coord(&coord), coord);
    }
}
