//! Spatial indexing for O(log n) hit testing.
//!
//! An R-tree over vertex positions answers "which node is under the
//! pointer" without scanning every vertex.

mod rtree;

pub use rtree::{NodePoint, SpatialIndex};
