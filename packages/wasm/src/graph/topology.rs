//! Topology export for petgraph algorithms.
//!
//! [`Topology`] copies the node and edge structure of any [`GraphView`] into
//! a petgraph `StableGraph` so library algorithms (DFS, degree counts, ...)
//! can run over the graph world without knowing about the store. The copy is
//! a point-in-time view; positions are not included.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{Dfs, VisitMap};
use petgraph::{Directed, Direction};

use super::view::GraphView;
use crate::error::{GraphResult, GraphWorldError};

/// Directed topology with string ids as weights.
///
/// Node weights are node ids, edge weights are edge ids.
pub struct Topology {
    graph: StableGraph<String, String, Directed>,

    /// Map from node id to petgraph NodeIndex
    node_index: HashMap<String, NodeIndex>,
}

impl Topology {
    /// Copy the topology of a graph view.
    ///
    /// Fails with `NotFound` if an edge names a node the view does not list.
    pub fn from_view(view: &impl GraphView) -> GraphResult<Self> {
        let nodes = view.nodes();
        let edges = view.edges();

        let mut graph = StableGraph::with_capacity(nodes.len(), edges.len());
        let mut node_index = HashMap::with_capacity(nodes.len());
        for id in nodes.iter() {
            let index = graph.add_node(id.clone());
            node_index.insert(id.clone(), index);
        }

        for edge in edges.iter() {
            let source = view.source(edge)?;
            let target = view.target(edge)?;
            let source_index = *node_index
                .get(&source)
                .ok_or_else(|| GraphWorldError::vertex_not_found(source.as_str()))?;
            let target_index = *node_index
                .get(&target)
                .ok_or_else(|| GraphWorldError::vertex_not_found(target.as_str()))?;
            graph.add_edge(source_index, target_index, edge.clone());
        }

        Ok(Self { graph, node_index })
    }

    /// The underlying petgraph graph.
    pub fn graph(&self) -> &StableGraph<String, String, Directed> {
        &self.graph
    }

    pub fn index_of(&self, node: &str) -> Option<NodeIndex> {
        self.node_index.get(node).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Ids of the targets of a node's outgoing edges.
    pub fn successors(&self, node: &str) -> GraphResult<Vec<&str>> {
        self.neighbors(node, Direction::Outgoing)
    }

    /// Ids of the sources of a node's incoming edges.
    pub fn predecessors(&self, node: &str) -> GraphResult<Vec<&str>> {
        self.neighbors(node, Direction::Incoming)
    }

    fn neighbors(&self, node: &str, direction: Direction) -> GraphResult<Vec<&str>> {
        let index = self
            .index_of(node)
            .ok_or_else(|| GraphWorldError::vertex_not_found(node))?;
        Ok(self
            .graph
            .neighbors_directed(index, direction)
            .filter_map(|n| self.graph.node_weight(n).map(String::as_str))
            .collect())
    }

    /// `(out_degree, in_degree)` of a node.
    pub fn degree(&self, node: &str) -> GraphResult<(usize, usize)> {
        let index = self
            .index_of(node)
            .ok_or_else(|| GraphWorldError::vertex_not_found(node))?;
        Ok((
            self.graph.edges_directed(index, Direction::Outgoing).count(),
            self.graph.edges_directed(index, Direction::Incoming).count(),
        ))
    }

    /// Depth-first visit order over all nodes.
    ///
    /// A new search starts from each node not yet discovered, in insertion
    /// order, so every node appears exactly once.
    pub fn dfs_order(&self) -> Vec<&str> {
        let mut order = Vec::with_capacity(self.graph.node_count());
        let mut dfs = Dfs::empty(&self.graph);

        for start in self.graph.node_indices() {
            if dfs.discovered.is_visited(&start) {
                continue;
            }
            dfs.move_to(start);
            while let Some(index) = dfs.next(&self.graph) {
                if let Some(id) = self.graph.node_weight(index) {
                    order.push(id.as_str());
                }
            }
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Edge, EntityCollection, Vertex, edge_id};
    use crate::graph::GraphWorldGraph;
    use crate::world::{GraphWorld, GraphWorldEntities};

    fn world(nodes: &[&str], edges: &[(&str, &str)]) -> GraphWorld {
        let vertices =
            EntityCollection::create(nodes.iter().map(|id| (*id, Vertex::default()))).unwrap();
        let edges = EntityCollection::create(
            edges.iter().map(|(s, t)| (edge_id(s, t), Edge::new(*s, *t))),
        )
        .unwrap();
        GraphWorld::new(GraphWorldEntities::new(vertices, edges).unwrap())
    }

    #[test]
    fn test_from_view_counts() {
        let world = world(&["a", "b", "c"], &[("a", "b"), ("b", "a"), ("b", "c")]);
        let topology = Topology::from_view(&GraphWorldGraph::new(&world)).unwrap();

        assert_eq!(topology.node_count(), 3);
        assert_eq!(topology.edge_count(), 3);
        assert!(topology.index_of("c").is_some());
        assert!(topology.index_of("d").is_none());
    }

    #[test]
    fn test_neighbors_and_degree() {
        let world = world(&["a", "b", "c"], &[("a", "b"), ("b", "a"), ("b", "c")]);
        let topology = Topology::from_view(&GraphWorldGraph::new(&world)).unwrap();

        let mut successors = topology.successors("b").unwrap();
        successors.sort();
        assert_eq!(successors, ["a", "c"]);
        assert_eq!(topology.predecessors("c").unwrap(), ["b"]);
        assert_eq!(topology.degree("b").unwrap(), (2, 1));
        assert_eq!(topology.degree("c").unwrap(), (0, 1));
        assert!(topology.degree("zz").unwrap_err().is_not_found());
    }

    #[test]
    fn test_dfs_order_covers_all_nodes() {
        // Two components plus an isolated node.
        let world = world(&["a", "b", "c", "d", "e"], &[("a", "c"), ("b", "d")]);
        let topology = Topology::from_view(&GraphWorldGraph::new(&world)).unwrap();

        assert_eq!(topology.dfs_order(), ["a", "c", "b", "d", "e"]);
    }

    #[test]
    fn test_dfs_order_empty() {
        let world = world(&[], &[]);
        let topology = Topology::from_view(&GraphWorldGraph::new(&world)).unwrap();
        assert!(topology.dfs_order().is_empty());
    }
}
