//! Layout algorithms for graph visualization.
//!
//! A [`Layout`] reads a [`GraphView`] and computes a target position for
//! every node. [`apply_layout`] commits those positions through
//! [`GraphMutation::update_each_node_attributes`], so any algorithm written
//! against the traits can drive a graph world without knowing about the store.

pub mod circular;
pub mod random;

use std::collections::HashMap;

use tracing::debug;

use crate::entity::Vertex;
use crate::error::{GraphResult, GraphWorldError};
use crate::graph::{GraphMutation, GraphView};

pub use circular::{CircularLayout, CircularLayoutConfig, CircularOrder};
pub use random::{RandomLayout, RandomLayoutConfig};

/// Computed node positions keyed by node id.
pub type Positions = HashMap<String, Vertex>;

/// A layout algorithm.
pub trait Layout {
    /// Compute a position for every node of `graph`.
    ///
    /// Implementations only read; committing is left to [`apply_layout`].
    fn compute(&mut self, graph: &impl GraphView) -> GraphResult<Positions>;
}

/// Compute a layout and commit it.
///
/// Each node's previous position is ignored. A node the layout produced no
/// position for fails with `NotFound` and stops the commit pass.
pub fn apply_layout<G, L>(graph: &G, layout: &mut L) -> GraphResult<()>
where
    G: GraphMutation,
    L: Layout,
{
    let positions = layout.compute(graph)?;
    debug!(node_count = positions.len(), "Applying layout");

    graph.try_update_each_node_attributes(|id, _| {
        positions
            .get(id)
            .copied()
            .ok_or_else(|| GraphWorldError::vertex_not_found(id))
    })
}
