//! Graph World - WASM Module
//!
//! A small directed graph whose vertex positions and edge topology live in a
//! copy-on-write entity store instead of a graph library's own storage. It is
//! compiled to WebAssembly and exposes a JavaScript-friendly API via
//! wasm-bindgen; the core is plain Rust.
//!
//! # Architecture
//!
//! - `entity`: Ordered entity collections and the vertex/edge states
//! - `world`: Snapshots, the snapshot owner, and the random generator
//! - `graph`: Graph capability traits and the store adapter
//! - `layout`: Pluggable layout algorithms committed through the adapter
//! - `render`: Read-only per-frame buffer extraction
//! - `spatial`: R-tree spatial indexing for O(log n) hit testing
//! - `random`: Injectable uniform random source

use js_sys::Float32Array;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod entity;
pub mod error;
pub mod graph;
pub mod layout;
pub mod random;
pub mod render;
pub mod spatial;
pub mod world;

use entity::{Edge, EntityCollection, Vertex};
use error::GraphResult;
use graph::{GraphMutation, GraphView, GraphWorldGraph};
use layout::{CircularLayout, CircularLayoutConfig, RandomLayout, RandomLayoutConfig, apply_layout};
use random::RngSource;
use render::FrameBuffers;
use spatial::SpatialIndex;
use world::{EntityStore, GraphWorld, GraphWorldEntities};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// The initial world of the demo page: `a = (10, 10)`, `b = (25, 25)` and
/// the edge `"a, b"`.
fn demo_entities() -> GraphResult<GraphWorldEntities> {
    GraphWorldEntities::new(
        EntityCollection::create([("a", Vertex::new(10.0, 10.0)), ("b", Vertex::new(25.0, 25.0))])?,
        EntityCollection::create([("a, b", Edge::new("a", "b"))])?,
    )
}

/// Seed from the JS RNG when the caller does not pass one.
fn seed_or_entropy(seed: Option<u32>) -> u64 {
    match seed {
        Some(seed) => u64::from(seed),
        None => (js_sys::Math::random() * u64::MAX as f64) as u64,
    }
}

/// Main entry point for the graph world.
///
/// Owns the [`GraphWorld`] snapshot store and hands out a
/// [`GraphWorldGraph`] adapter for every call.
#[wasm_bindgen]
pub struct GraphWorldWasm {
    world: GraphWorld,
    spatial: SpatialIndex,
    /// World revision the spatial index was built at
    spatial_revision: Option<u64>,
}

impl GraphWorldWasm {
    fn from_entities(entities: GraphWorldEntities) -> Self {
        Self {
            world: GraphWorld::new(entities),
            spatial: SpatialIndex::new(),
            spatial_revision: None,
        }
    }

    fn graph(&self) -> GraphWorldGraph<&GraphWorld> {
        GraphWorldGraph::new(&self.world)
    }
}

#[wasm_bindgen]
impl GraphWorldWasm {
    /// Create the two-vertex demo world.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<GraphWorldWasm, JsError> {
        Ok(Self::from_entities(demo_entities()?))
    }

    /// Create a random world.
    ///
    /// # Arguments
    ///
    /// * `vertex_amount` - Number of vertices
    /// * `x_min`, `x_max` - Half-open x range of vertex positions
    /// * `y_min`, `y_max` - Half-open y range of vertex positions
    /// * `seed` - Optional seed; omitted means a fresh random seed
    #[wasm_bindgen(js_name = createWithRandom)]
    pub fn create_with_random(
        vertex_amount: usize,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        seed: Option<u32>,
    ) -> Result<GraphWorldWasm, JsError> {
        let mut source = RngSource::seeded(seed_or_entropy(seed));
        let entities = GraphWorldEntities::create_with_random(
            vertex_amount,
            x_min,
            x_max,
            y_min,
            y_max,
            &mut source,
        )?;
        Ok(Self::from_entities(entities))
    }

    /// Load a world from its JSON interchange form.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(text: &str) -> Result<GraphWorldWasm, JsError> {
        Ok(Self::from_entities(GraphWorldEntities::from_json(text)?))
    }

    /// Load a world from a plain JS object in the interchange shape.
    #[wasm_bindgen(js_name = fromJs)]
    pub fn from_js(value: JsValue) -> Result<GraphWorldWasm, JsError> {
        let entities: GraphWorldEntities =
            serde_wasm_bindgen::from_value(value).map_err(|err| JsError::new(&err.to_string()))?;
        Ok(Self::from_entities(entities))
    }

    // =========================================================================
    // Graph Reads
    // =========================================================================

    /// Node ids in order.
    pub fn nodes(&self) -> Vec<String> {
        self.graph().nodes().to_vec()
    }

    /// Edge ids in order.
    pub fn edges(&self) -> Vec<String> {
        self.graph().edges().to_vec()
    }

    /// Source node id of an edge.
    pub fn source(&self, edge: &str) -> Result<String, JsError> {
        Ok(self.graph().source(edge)?)
    }

    /// Target node id of an edge.
    pub fn target(&self, edge: &str) -> Result<String, JsError> {
        Ok(self.graph().target(edge)?)
    }

    /// Read the `x` or `y` attribute of a node.
    #[wasm_bindgen(js_name = getNodeAttribute)]
    pub fn get_node_attribute(&self, node: &str, name: &str) -> Result<f64, JsError> {
        Ok(self.graph().get_attribute(node, name)?)
    }

    /// Get the number of nodes.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.graph().node_count() as u32
    }

    /// Get the number of edges.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.graph().edge_count() as u32
    }

    /// Number of commits so far. Unchanged revision means unchanged positions.
    pub fn revision(&self) -> f64 {
        self.world.revision() as f64
    }

    // =========================================================================
    // Frame Buffers
    // =========================================================================

    /// Node positions as [x0, y0, x1, y1, ...] in node order.
    #[wasm_bindgen(js_name = nodePositions)]
    pub fn node_positions(&self) -> Result<Float32Array, JsError> {
        let frame = FrameBuffers::collect(&self.graph())?;
        Ok(Float32Array::from(&frame.nodes[..]))
    }

    /// Edge segments as [sx0, sy0, tx0, ty0, ...] in edge order.
    #[wasm_bindgen(js_name = edgeSegments)]
    pub fn edge_segments(&self) -> Result<Float32Array, JsError> {
        let frame = FrameBuffers::collect(&self.graph())?;
        Ok(Float32Array::from(&frame.segments[..]))
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Find the nearest node within a maximum distance.
    ///
    /// The spatial index is rebuilt first if positions changed since the
    /// last query.
    #[wasm_bindgen(js_name = findNearestNode)]
    pub fn find_nearest_node(
        &mut self,
        x: f64,
        y: f64,
        max_distance: f64,
    ) -> Result<Option<String>, JsError> {
        let revision = self.world.revision();
        if self.spatial_revision != Some(revision) {
            self.spatial.rebuild(&GraphWorldGraph::new(&self.world))?;
            self.spatial_revision = Some(revision);
        }
        Ok(self
            .spatial
            .nearest_within(x, y, max_distance)
            .map(str::to_string))
    }

    // =========================================================================
    // Position Updates
    // =========================================================================

    /// Move every node to a uniformly random position in the rectangle.
    #[wasm_bindgen(js_name = randomizePositions)]
    pub fn randomize_positions(
        &mut self,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        seed: Option<u32>,
    ) -> Result<(), JsError> {
        let config = RandomLayoutConfig {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        let mut layout = RandomLayout::new(config, RngSource::seeded(seed_or_entropy(seed)));
        apply_layout(&self.graph(), &mut layout)?;
        Ok(())
    }

    /// Place nodes on a circle in depth-first order.
    #[wasm_bindgen(js_name = circularLayout)]
    pub fn circular_layout(
        &mut self,
        center_x: f64,
        center_y: f64,
        radius: f64,
    ) -> Result<(), JsError> {
        let config = CircularLayoutConfig {
            center_x,
            center_y,
            radius,
            ..CircularLayoutConfig::default()
        };
        apply_layout(&self.graph(), &mut CircularLayout::new(config))?;
        Ok(())
    }

    /// Set all node positions from [x0, y0, x1, y1, ...] in node order.
    #[wasm_bindgen(js_name = setNodePositions)]
    pub fn set_node_positions(&mut self, positions: &[f64]) -> Result<(), JsError> {
        let graph = self.graph();
        let expected = graph.node_count() * 2;
        if positions.len() != expected {
            return Err(JsError::new(&format!(
                "Expected {expected} position values, got {}",
                positions.len()
            )));
        }
        if let Some(index) = positions.iter().position(|value| !value.is_finite()) {
            return Err(JsError::new(&format!("Position value {index} is not finite")));
        }

        let mut points = positions.chunks_exact(2);
        graph.update_each_node_attributes(|_, current| {
            points
                .next()
                .map(|point| Vertex::new(point[0], point[1]))
                .unwrap_or(*current)
        })?;
        Ok(())
    }

    // =========================================================================
    // Interchange
    // =========================================================================

    /// Serialize the current snapshot to JSON.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsError> {
        Ok(self.world.entities().to_json()?)
    }

    /// Serialize the current snapshot to a plain JS object.
    #[wasm_bindgen(js_name = toJs)]
    pub fn to_js(&self) -> Result<JsValue, JsError> {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        self.world
            .entities()
            .serialize(&serializer)
            .map_err(|err| JsError::new(&err.to_string()))
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::error::GraphWorldError;
    use crate::graph::Topology;

    #[test]
    fn test_demo_world_scenario() {
        let world = GraphWorld::new(demo_entities().unwrap());
        let graph = GraphWorldGraph::new(&world);

        assert_eq!(&*graph.nodes(), ["a", "b"]);
        assert_eq!(&*graph.edges(), ["a, b"]);
        assert_eq!(graph.source("a, b").unwrap(), "a");
        assert_eq!(graph.target("a, b").unwrap(), "b");
        assert_eq!(graph.get_attribute("a", "x").unwrap(), 10.0);

        graph
            .update_each_node_attributes(|id, current| {
                if id == "a" { Vertex::new(100.0, 100.0) } else { *current }
            })
            .unwrap();

        assert_eq!(graph.get_attribute("a", "x").unwrap(), 100.0);
        assert_eq!(graph.get_attribute("b", "x").unwrap(), 25.0);
        assert_eq!(graph.get_attribute("b", "y").unwrap(), 25.0);
    }

    /// Generate -> store -> adapter -> layout -> frame -> interchange, the
    /// same path the demo page takes on a "randomize" click.
    #[test]
    fn test_full_pipeline() {
        let entities = GraphWorldEntities::create_with_random(
            32,
            0.0,
            512.0,
            0.0,
            512.0,
            &mut RngSource::seeded(512),
        )
        .unwrap();
        let edge_ids = entities.edges().shared_ids();
        let world = GraphWorld::new(entities);
        let graph = GraphWorldGraph::new(&world);

        let before = FrameBuffers::collect(&graph).unwrap();
        let mut layout = RandomLayout::new(RandomLayoutConfig::default(), RngSource::seeded(1));
        apply_layout(&graph, &mut layout).unwrap();
        let after = FrameBuffers::collect(&graph).unwrap();

        assert_eq!(world.revision(), 32);
        assert_eq!(before.node_count(), after.node_count());
        assert_ne!(before.nodes, after.nodes);
        // Topology is untouched by position updates.
        assert_eq!(graph.edges(), edge_ids);
        assert_eq!(after.segment_count(), edge_ids.len());

        let restored = GraphWorldEntities::from_json(&world.entities().to_json().unwrap()).unwrap();
        assert_eq!(restored, *world.entities());
    }

    #[test]
    fn test_generation_reproducible_across_runs() {
        let run = |seed| {
            let entities = GraphWorldEntities::create_with_random(
                20,
                0.0,
                512.0,
                0.0,
                512.0,
                &mut RngSource::seeded(seed),
            )
            .unwrap();
            entities.to_json().unwrap()
        };
        assert_eq!(run(99), run(99));
        assert_ne!(run(99), run(100));
    }

    #[test]
    fn test_topology_of_generated_world() {
        let world = GraphWorld::new(
            GraphWorldEntities::create_with_random(
                12,
                0.0,
                512.0,
                0.0,
                512.0,
                &mut RngSource::seeded(4),
            )
            .unwrap(),
        );
        let graph = GraphWorldGraph::new(&world);
        let topology = Topology::from_view(&graph).unwrap();

        assert_eq!(topology.node_count(), graph.node_count());
        assert_eq!(topology.edge_count(), graph.edge_count());

        let mut out_total = 0;
        for node in graph.nodes().iter() {
            out_total += topology.degree(node).unwrap().0;
        }
        assert_eq!(out_total, graph.edge_count());
    }

    #[test]
    fn test_errors_surface_to_caller() {
        let world = GraphWorld::new(demo_entities().unwrap());
        let graph = GraphWorldGraph::new(&world);

        assert!(matches!(graph.get_attribute("a", "z"), Err(GraphWorldError::NotImplemented(_))));
        assert!(graph.source("missing").unwrap_err().is_not_found());
        assert!(graph.target("missing").unwrap_err().is_not_found());
        assert!(world.entities().vertices().get("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_circular_then_spatial_lookup() {
        let world = GraphWorld::new(demo_entities().unwrap());
        let graph = GraphWorldGraph::new(&world);
        let config = CircularLayoutConfig {
            center_x: 0.0,
            center_y: 0.0,
            radius: 50.0,
            ..CircularLayoutConfig::default()
        };
        apply_layout(&graph, &mut CircularLayout::new(config)).unwrap();

        let index = SpatialIndex::from_graph(&graph).unwrap();
        // "a" is first in depth-first order, so it sits at angle 0.
        assert_eq!(index.nearest_within(50.0, 0.0, 1.0), Some("a"));
        assert_eq!(index.nearest_within(-50.0, 0.0, 1.0), Some("b"));
    }
}
