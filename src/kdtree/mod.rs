//! A bucketed k-d tree for approximate nearest neighbor search.
//!
//! Items live only in leaves. Each internal node splits its items at the median coordinate of
//! one dimension, and a leaf is a contiguous run of at most `leaf_size` items. A search descends
//! to exactly one leaf and hands back that leaf's items as a candidate bucket, which
//! [`knn::nearest`][crate::knn::nearest] then refines exactly.

#![warn(missing_docs)]

mod builder;
mod index;
mod r#trait;
mod traversal;

pub use builder::{KdTreeBuilder, SplitPolicy, DEFAULT_LEAF_SIZE};
pub use index::{KdTreeLayout, KdTreeRef, OwnedKdTree};
pub use r#trait::KdTreeIndex;
pub use traversal::{Leaves, Node};
