//! An implementation of an immutable K-D Tree with exact k-nearest-neighbor search.

#![warn(missing_docs)]

mod builder;
mod index;
mod search;
mod r#trait;
mod traversal;
mod validation;

pub use builder::KDTreeBuilder;
pub use index::{KDTree, Node};
pub use r#trait::KDTreeIndex;
pub use search::Neighbor;
pub use traversal::NodeRef;
pub use validation::ValidationReport;
