//! R-tree over vertex positions for pointer hit testing.
//!
//! The index is a copy of one snapshot. After positions are committed, call
//! [`SpatialIndex::rebuild`] before querying again.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::entity::Vertex;
use crate::error::GraphResult;
use crate::graph::GraphView;

/// A vertex id at its indexed position.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePoint {
    pub id: String,
    pub position: Vertex,
}

impl RTreeObject for NodePoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.position.x, self.position.y])
    }
}

impl PointDistance for NodePoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position.x - point[0];
        let dy = self.position.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over the vertex positions of a graph.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<NodePoint>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the current node positions of a graph.
    pub fn from_graph(graph: &impl GraphView) -> GraphResult<Self> {
        let mut index = Self::new();
        index.rebuild(graph)?;
        Ok(index)
    }

    /// Replace the indexed points with the graph's current positions.
    pub fn rebuild(&mut self, graph: &impl GraphView) -> GraphResult<()> {
        let points = graph
            .nodes()
            .iter()
            .map(|id| {
                graph.node_position(id).map(|position| NodePoint {
                    id: id.clone(),
                    position,
                })
            })
            .collect::<GraphResult<Vec<_>>>()?;

        self.tree = RTree::bulk_load(points);
        Ok(())
    }

    /// Nearest vertex to `(x, y)` and its distance.
    pub fn nearest(&self, x: f64, y: f64) -> Option<(&str, f64)> {
        self.tree
            .nearest_neighbor_iter_with_distance_2(&[x, y])
            .next()
            .map(|(point, distance_2)| (point.id.as_str(), distance_2.sqrt()))
    }

    /// Nearest vertex no farther than `max_distance`, e.g. the node under
    /// a pointer with a pick radius.
    pub fn nearest_within(&self, x: f64, y: f64, max_distance: f64) -> Option<&str> {
        self.nearest(x, y)
            .filter(|&(_, distance)| distance <= max_distance)
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
