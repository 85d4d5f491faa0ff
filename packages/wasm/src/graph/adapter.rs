//! GraphWorldGraph - graph adapter over a graph world store.
//!
//! The adapter holds nothing but its store handle. Every read goes to the
//! snapshot that is current at call time, and every write is a per-node
//! commit through [`EntityStore::commit_vertex`].

use std::rc::Rc;

use tracing::{debug, trace};

use super::view::{GraphMutation, GraphView};
use crate::entity::{Vertex, VertexAttribute};
use crate::error::GraphResult;
use crate::world::{EntityStore, GraphWorldEntities};

/// Graph view of an [`EntityStore`].
///
/// `S` is usually `&GraphWorld` or `Rc<GraphWorld>`.
#[derive(Debug, Clone)]
pub struct GraphWorldGraph<S> {
    store: S,
}

impl<S: EntityStore> GraphWorldGraph<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The snapshot current at call time.
    #[inline]
    pub fn snapshot(&self) -> Rc<GraphWorldEntities> {
        self.store.entities()
    }

    pub fn has_node(&self, node: &str) -> bool {
        self.snapshot().vertices().contains(node)
    }

    pub fn has_edge(&self, edge: &str) -> bool {
        self.snapshot().edges().contains(edge)
    }
}

impl<S: EntityStore> GraphView for GraphWorldGraph<S> {
    fn nodes(&self) -> Rc<[String]> {
        self.snapshot().vertices().shared_ids()
    }

    fn edges(&self) -> Rc<[String]> {
        self.snapshot().edges().shared_ids()
    }

    fn source(&self, edge: &str) -> GraphResult<String> {
        Ok(self.snapshot().edges().get(edge)?.source_id.clone())
    }

    fn target(&self, edge: &str) -> GraphResult<String> {
        Ok(self.snapshot().edges().get(edge)?.target_id.clone())
    }

    fn get_attribute(&self, node: &str, name: &str) -> GraphResult<f64> {
        // Attribute name is checked before the node lookup.
        let attribute: VertexAttribute = name.parse()?;
        Ok(self.snapshot().vertices().get(node)?.attribute(attribute))
    }

    fn node_position(&self, node: &str) -> GraphResult<Vertex> {
        Ok(*self.snapshot().vertices().get(node)?)
    }

    fn for_each_node<F>(&self, mut callback: F)
    where
        F: FnMut(&str, &Vertex),
    {
        let snapshot = self.snapshot();
        for (id, vertex) in snapshot.vertices().iter() {
            callback(id, vertex);
        }
    }

    fn node_count(&self) -> usize {
        self.snapshot().vertices().len()
    }

    fn edge_count(&self) -> usize {
        self.snapshot().edges().len()
    }
}

impl<S: EntityStore> GraphMutation for GraphWorldGraph<S> {
    fn try_update_each_node_attributes<F>(&self, mut updater: F) -> GraphResult<()>
    where
        F: FnMut(&str, &Vertex) -> GraphResult<Vertex>,
    {
        let ids = self.nodes();
        for id in ids.iter() {
            // Copied out so no snapshot handle outlives the read; the commit
            // can then update the store in place.
            let current = *self.store.entities().vertices().get(id)?;
            let next_state = updater(id, &current)?;
            self.store.commit_vertex(id, next_state)?;
            trace!(node = %id, "Committed node attributes");
        }

        debug!(node_count = ids.len(), "Updated node attributes");
        Ok(())
    }
}

impl<S: EntityStore> GraphWorldGraph<S> {
    /// Commit a single node's new state.
    pub fn set_node_position(&self, node: &str, position: Vertex) -> GraphResult<()> {
        self.store.commit_vertex(node, position)
    }

    /// Endpoint positions of an edge, source first.
    pub fn edge_endpoints(&self, edge: &str) -> GraphResult<(Vertex, Vertex)> {
        let snapshot = self.snapshot();
        let edge_state = snapshot.edges().get(edge)?;
        let source = snapshot.vertices().get(&edge_state.source_id)?;
        let target = snapshot.vertices().get(&edge_state.target_id)?;
        Ok((*source, *target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Edge, EntityCollection};
    use crate::error::{EntityKind, GraphWorldError};
    use crate::random::RngSource;
    use crate::world::GraphWorld;

    fn two_vertex_world() -> GraphWorld {
        let vertices = EntityCollection::create([
            ("a", Vertex::new(10.0, 10.0)),
            ("b", Vertex::new(25.0, 25.0)),
        ])
        .unwrap();
        let edges = EntityCollection::create([("a, b", Edge::new("a", "b"))]).unwrap();
        GraphWorld::new(GraphWorldEntities::new(vertices, edges).unwrap())
    }

    #[test]
    fn test_two_vertex_reads() {
        let world = two_vertex_world();
        let graph = GraphWorldGraph::new(&world);

        assert_eq!(&*graph.nodes(), ["a", "b"]);
        assert_eq!(&*graph.edges(), ["a, b"]);
        assert_eq!(graph.source("a, b").unwrap(), "a");
        assert_eq!(graph.target("a, b").unwrap(), "b");
        assert_eq!(graph.get_attribute("a", "x").unwrap(), 10.0);
        assert_eq!(graph.get_attribute("b", "y").unwrap(), 25.0);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_node("a"));
        assert!(graph.has_edge("a, b"));
        assert!(!graph.has_edge("b, a"));
    }

    #[test]
    fn test_unknown_ids_not_found() {
        let world = two_vertex_world();
        let graph = GraphWorldGraph::new(&world);

        for err in [
            graph.source("b, a").unwrap_err(),
            graph.target("nope").unwrap_err(),
        ] {
            assert!(matches!(err, GraphWorldError::NotFound { kind: EntityKind::Edge, .. }));
        }
        assert!(matches!(
            graph.get_attribute("c", "x"),
            Err(GraphWorldError::NotFound { kind: EntityKind::Vertex, .. })
        ));
        assert!(graph.node_position("c").unwrap_err().is_not_found());
    }

    #[test]
    fn test_unknown_attribute_not_implemented() {
        let world = two_vertex_world();
        let graph = GraphWorldGraph::new(&world);

        for node in ["a", "b"] {
            assert!(matches!(
                graph.get_attribute(node, "z"),
                Err(GraphWorldError::NotImplemented(ref name)) if name == "z"
            ));
        }
        // The name is rejected before the node is looked up.
        assert!(matches!(
            graph.get_attribute("missing", "z"),
            Err(GraphWorldError::NotImplemented(_))
        ));
    }

    #[test]
    fn test_update_commits_and_is_visible() {
        let world = two_vertex_world();
        let graph = GraphWorldGraph::new(&world);

        graph
            .update_each_node_attributes(|id, current| {
                if id == "a" { Vertex::new(100.0, 100.0) } else { *current }
            })
            .unwrap();

        assert_eq!(graph.get_attribute("a", "x").unwrap(), 100.0);
        assert_eq!(graph.get_attribute("a", "y").unwrap(), 100.0);
        assert_eq!(graph.node_position("b").unwrap(), Vertex::new(25.0, 25.0));
        assert_eq!(world.revision(), 2);
    }

    #[test]
    fn test_update_identity_is_observationally_equal() {
        let world = GraphWorld::new(
            GraphWorldEntities::create_with_random(
                20,
                0.0,
                512.0,
                0.0,
                512.0,
                &mut RngSource::seeded(11),
            )
            .unwrap(),
        );
        let before = world.entities();
        let graph = GraphWorldGraph::new(&world);

        graph.update_each_node_attributes(|_, current| *current).unwrap();

        assert_eq!(*world.entities(), *before);
        assert_eq!(world.revision(), 20);
    }

    #[test]
    fn test_update_pass_reuses_unshared_snapshot() {
        let world = GraphWorld::new(
            GraphWorldEntities::create_with_random(
                50,
                0.0,
                512.0,
                0.0,
                512.0,
                &mut RngSource::seeded(3),
            )
            .unwrap(),
        );
        let graph = GraphWorldGraph::new(&world);
        let before = Rc::as_ptr(&world.entities());

        graph
            .update_each_node_attributes(|_, current| Vertex::new(current.y, current.x))
            .unwrap();

        assert_eq!(Rc::as_ptr(&world.entities()), before);
        assert_eq!(world.revision(), 50);
    }

    #[test]
    fn test_update_pass_leaves_held_snapshot_intact() {
        let world = two_vertex_world();
        let graph = GraphWorldGraph::new(&world);
        let held = graph.snapshot();

        graph
            .update_each_node_attributes(|_, _| Vertex::new(0.0, 0.0))
            .unwrap();

        assert_eq!(held.vertices().get("a").unwrap(), &Vertex::new(10.0, 10.0));
        assert_eq!(graph.node_position("a").unwrap(), Vertex::new(0.0, 0.0));
        assert!(held.edges().shares_ids_with(graph.snapshot().edges()));
    }

    #[test]
    fn test_update_commits_in_order_and_each_is_visible() {
        let world = two_vertex_world();
        let graph = GraphWorldGraph::new(&world);
        let mut seen = Vec::new();

        graph
            .update_each_node_attributes(|id, current| {
                // The earlier commit is visible to later iterations.
                seen.push((id.to_string(), graph.get_attribute("a", "x").unwrap()));
                Vertex::new(current.x + 1.0, current.y)
            })
            .unwrap();

        assert_eq!(seen, [("a".to_string(), 10.0), ("b".to_string(), 11.0)]);
    }

    #[test]
    fn test_failed_update_aborts_remaining_nodes() {
        let world = GraphWorld::new(
            GraphWorldEntities::new(
                EntityCollection::create([
                    ("a", Vertex::new(0.0, 0.0)),
                    ("b", Vertex::new(0.0, 0.0)),
                    ("c", Vertex::new(0.0, 0.0)),
                ])
                .unwrap(),
                EntityCollection::default(),
            )
            .unwrap(),
        );
        let graph = GraphWorldGraph::new(&world);

        let result = graph.try_update_each_node_attributes(|id, _| {
            if id == "b" {
                Err(GraphWorldError::vertex_not_found(id))
            } else {
                Ok(Vertex::new(1.0, 1.0))
            }
        });

        assert!(result.is_err());
        assert_eq!(graph.node_position("a").unwrap(), Vertex::new(1.0, 1.0));
        assert_eq!(graph.node_position("b").unwrap(), Vertex::new(0.0, 0.0));
        assert_eq!(graph.node_position("c").unwrap(), Vertex::new(0.0, 0.0));
        assert_eq!(world.revision(), 1);
    }

    #[test]
    fn test_for_each_node_order() {
        let world = two_vertex_world();
        let graph = GraphWorldGraph::new(&world);
        let mut visited = Vec::new();
        graph.for_each_node(|id, vertex| visited.push((id.to_string(), vertex.x)));
        assert_eq!(visited, [("a".to_string(), 10.0), ("b".to_string(), 25.0)]);
    }

    #[test]
    fn test_edges_reference_nodes_after_updates() {
        let world = GraphWorld::new(
            GraphWorldEntities::create_with_random(
                15,
                0.0,
                512.0,
                0.0,
                512.0,
                &mut RngSource::seeded(77),
            )
            .unwrap(),
        );
        let graph = GraphWorldGraph::new(&world);
        graph
            .update_each_node_attributes(|_, v| Vertex::new(v.y, v.x))
            .unwrap();

        let nodes = graph.nodes();
        for edge in graph.edges().iter() {
            assert!(nodes.contains(&graph.source(edge).unwrap()));
            assert!(nodes.contains(&graph.target(edge).unwrap()));
        }
    }

    #[test]
    fn test_set_node_position_and_endpoints() {
        let world = two_vertex_world();
        let graph = GraphWorldGraph::new(Rc::new(world));

        graph.set_node_position("b", Vertex::new(1.0, 2.0)).unwrap();
        let (source, target) = graph.edge_endpoints("a, b").unwrap();
        assert_eq!(source, Vertex::new(10.0, 10.0));
        assert_eq!(target, Vertex::new(1.0, 2.0));
        assert!(graph.set_node_position("zz", Vertex::default()).unwrap_err().is_not_found());
    }
}
