//! Uniform random repositioning.
//!
//! Every node gets a fresh position drawn independently inside a rectangle,
//! x before y, in node order. With a deterministic [`UnitSource`] the result
//! is reproducible.

use serde::{Deserialize, Serialize};

use super::{Layout, Positions};
use crate::entity::Vertex;
use crate::error::GraphResult;
use crate::graph::GraphView;
use crate::random::{UnitSource, random_in_range, validate_range};

/// Target rectangle for random repositioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RandomLayoutConfig {
    /// Inclusive lower x bound (default: 0.0).
    pub x_min: f64,
    /// Exclusive upper x bound (default: 512.0).
    pub x_max: f64,
    /// Inclusive lower y bound (default: 0.0).
    pub y_min: f64,
    /// Exclusive upper y bound (default: 512.0).
    pub y_max: f64,
}

impl Default for RandomLayoutConfig {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 512.0,
            y_min: 0.0,
            y_max: 512.0,
        }
    }
}

/// Random layout drawing from a [`UnitSource`].
pub struct RandomLayout<S> {
    config: RandomLayoutConfig,
    source: S,
}

impl<S: UnitSource> RandomLayout<S> {
    pub fn new(config: RandomLayoutConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: UnitSource> Layout for RandomLayout<S> {
    fn compute(&mut self, graph: &impl GraphView) -> GraphResult<Positions> {
        let RandomLayoutConfig {
            x_min,
            x_max,
            y_min,
            y_max,
        } = self.config;
        validate_range("x", x_min, x_max)?;
        validate_range("y", y_min, y_max)?;

        let nodes = graph.nodes();
        let mut positions = Positions::with_capacity(nodes.len());
        for id in nodes.iter() {
            let x = random_in_range(&mut self.source, x_min, x_max);
            let y = random_in_range(&mut self.source, y_min, y_max);
            positions.insert(id.clone(), Vertex::new(x, y));
        }
        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphWorldError;
    use crate::graph::GraphWorldGraph;
    use crate::layout::apply_layout;
    use crate::random::{RngSource, SequenceSource};
    use crate::world::{GraphWorld, GraphWorldEntities};

    #[test]
    fn test_positions_inside_rectangle() {
        let world = GraphWorld::new(
            GraphWorldEntities::create_with_random(
                40,
                0.0,
                512.0,
                0.0,
                512.0,
                &mut RngSource::seeded(1),
            )
            .unwrap(),
        );
        let graph = GraphWorldGraph::new(&world);
        let config = RandomLayoutConfig {
            x_min: 100.0,
            x_max: 200.0,
            y_min: -50.0,
            y_max: 0.0,
        };

        apply_layout(&graph, &mut RandomLayout::new(config, RngSource::seeded(2))).unwrap();

        graph.for_each_node(|id, vertex| {
            assert!((100.0..200.0).contains(&vertex.x), "{id}: x={}", vertex.x);
            assert!((-50.0..0.0).contains(&vertex.y), "{id}: y={}", vertex.y);
        });
    }

    #[test]
    fn test_draw_order_is_node_order() {
        let world = GraphWorld::new(
            GraphWorldEntities::create_with_random(2, 0.0, 1.0, 0.0, 1.0, &mut RngSource::seeded(0))
                .unwrap(),
        );
        let graph = GraphWorldGraph::new(&world);
        let mut layout = RandomLayout::new(
            RandomLayoutConfig::default(),
            SequenceSource::new([0.0, 0.25, 0.5, 0.75]),
        );

        apply_layout(&graph, &mut layout).unwrap();

        assert_eq!(graph.node_position("0").unwrap(), Vertex::new(0.0, 128.0));
        assert_eq!(graph.node_position("1").unwrap(), Vertex::new(256.0, 384.0));
        assert_eq!(layout.into_source().drawn(), 4);
    }

    #[test]
    fn test_invalid_rectangle() {
        let world = GraphWorld::default();
        let graph = GraphWorldGraph::new(&world);
        let config = RandomLayoutConfig {
            x_max: -1.0,
            ..RandomLayoutConfig::default()
        };
        let result = RandomLayout::new(config, SequenceSource::new([0.5])).compute(&graph);
        assert!(matches!(result, Err(GraphWorldError::InvalidConfig(_))));
    }
}
