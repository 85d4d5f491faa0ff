//! Graph capability traits.
//!
//! Layout algorithms and renderers are written against these traits rather
//! than against a concrete storage. [`GraphView`] is the read side,
//! [`GraphMutation`] the write side.

use std::rc::Rc;

use crate::entity::Vertex;
use crate::error::GraphResult;

/// Read access to a directed graph with positioned nodes.
pub trait GraphView {
    /// Node ids in traversal order.
    fn nodes(&self) -> Rc<[String]>;

    /// Edge ids in traversal order.
    fn edges(&self) -> Rc<[String]>;

    /// Source node of an edge.
    fn source(&self, edge: &str) -> GraphResult<String>;

    /// Target node of an edge.
    fn target(&self, edge: &str) -> GraphResult<String>;

    /// Named numeric attribute of a node. Only `x` and `y` exist.
    fn get_attribute(&self, node: &str, name: &str) -> GraphResult<f64>;

    /// Full position of a node.
    fn node_position(&self, node: &str) -> GraphResult<Vertex>;

    /// Visit every node in [`GraphView::nodes`] order.
    fn for_each_node<F>(&self, callback: F)
    where
        F: FnMut(&str, &Vertex);

    fn node_count(&self) -> usize {
        self.nodes().len()
    }

    fn edge_count(&self) -> usize {
        self.edges().len()
    }
}

/// Write access to node attributes.
pub trait GraphMutation: GraphView {
    /// Replace every node's state with `updater(id, current)`.
    ///
    /// Nodes are visited in [`GraphView::nodes`] order as of the call start.
    /// Each result is committed before the next node is visited.
    fn update_each_node_attributes<F>(&self, mut updater: F) -> GraphResult<()>
    where
        F: FnMut(&str, &Vertex) -> Vertex,
    {
        self.try_update_each_node_attributes(|id, current| Ok(updater(id, current)))
    }

    /// Fallible variant of [`GraphMutation::update_each_node_attributes`].
    ///
    /// The first error stops the traversal. Nodes committed before it stay
    /// committed.
    fn try_update_each_node_attributes<F>(&self, updater: F) -> GraphResult<()>
    where
        F: FnMut(&str, &Vertex) -> GraphResult<Vertex>;
}
