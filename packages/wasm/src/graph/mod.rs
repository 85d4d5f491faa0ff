//! Graph capability traits and their graph world implementation.
//!
//! Consumers (layouts, renderers) use [`GraphView`] and [`GraphMutation`].
//! [`GraphWorldGraph`] implements both over an
//! [`EntityStore`](crate::world::EntityStore), and [`Topology`] copies any
//! view into petgraph for library algorithms.

mod adapter;
mod topology;
mod view;

pub use adapter::GraphWorldGraph;
pub use topology::Topology;
pub use view::{GraphMutation, GraphView};
