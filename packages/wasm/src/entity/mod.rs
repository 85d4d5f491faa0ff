//! Entity states and the ordered collection that holds them.
//!
//! Vertices and edges are plain state values keyed by string ids in an
//! [`EntityCollection`]. Collections are immutable; updates produce new
//! collections.

mod collection;
mod edge;
mod vertex;

pub(crate) use collection::RawCollection;
pub use collection::{Entity, EntityCollection};
pub use edge::{EDGE_ID_SEPARATOR, Edge, edge_id};
pub use vertex::{Vertex, VertexAttribute};
