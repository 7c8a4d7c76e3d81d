use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KdIndexError {
    /// Two points, or a query point and the tree, disagree on their number of dimensions.
    #[error("all points must have the same dimension: expected {expected}, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A radius-bounded query was given a radius that is not strictly positive.
    #[error("radius must be positive")]
    InvalidRadius,
}

pub type Result<T> = std::result::Result<T, KdIndexError>;
