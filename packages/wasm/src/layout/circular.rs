//! Circular layout.
//!
//! Places nodes evenly on a circle. In depth-first order, nodes joined by an
//! edge tend to land next to each other, which keeps most edges short.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Layout, Positions};
use crate::entity::Vertex;
use crate::error::{GraphResult, GraphWorldError};
use crate::graph::{GraphView, Topology};

/// Order in which nodes are placed around the circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CircularOrder {
    /// The graph's own node order.
    Nodes,
    /// Depth-first order over outgoing edges.
    #[default]
    DepthFirst,
}

/// Configuration for the circular layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CircularLayoutConfig {
    /// Circle center x (default: 256.0).
    pub center_x: f64,
    /// Circle center y (default: 256.0).
    pub center_y: f64,
    /// Circle radius (default: 200.0).
    pub radius: f64,
    /// Angle of the first node in radians (default: 0.0).
    pub start_angle: f64,
    /// Placement order (default: depth-first).
    pub order: CircularOrder,
}

impl Default for CircularLayoutConfig {
    fn default() -> Self {
        Self {
            center_x: 256.0,
            center_y: 256.0,
            radius: 200.0,
            start_angle: 0.0,
            order: CircularOrder::DepthFirst,
        }
    }
}

/// Circular layout.
#[derive(Debug, Clone, Default)]
pub struct CircularLayout {
    config: CircularLayoutConfig,
}

impl CircularLayout {
    pub fn new(config: CircularLayoutConfig) -> Self {
        Self { config }
    }

    fn validate(&self) -> GraphResult<()> {
        let c = &self.config;
        if ![c.center_x, c.center_y, c.start_angle].iter().all(|v| v.is_finite()) {
            return Err(GraphWorldError::InvalidConfig(
                "circle center and start angle must be finite".to_string(),
            ));
        }
        if !c.radius.is_finite() || c.radius < 0.0 {
            return Err(GraphWorldError::InvalidConfig(format!(
                "radius must be finite and non-negative, got {}",
                c.radius
            )));
        }
        Ok(())
    }
}

impl Layout for CircularLayout {
    fn compute(&mut self, graph: &impl GraphView) -> GraphResult<Positions> {
        self.validate()?;

        let order: Vec<String> = match self.config.order {
            CircularOrder::Nodes => graph.nodes().to_vec(),
            CircularOrder::DepthFirst => {
                let topology = Topology::from_view(graph)?;
                topology.dfs_order().into_iter().map(str::to_string).collect()
            }
        };

        let count = order.len();
        let CircularLayoutConfig {
            center_x,
            center_y,
            radius,
            start_angle,
            ..
        } = self.config;

        let positions: Positions = order
            .into_iter()
            .enumerate()
            .map(|(i, id)| {
                let angle = start_angle + TAU * i as f64 / count as f64;
                let position = Vertex::new(
                    center_x + radius * angle.cos(),
                    center_y + radius * angle.sin(),
                );
                (id, position)
            })
            .collect();

        debug!(node_count = count, order = ?self.config.order, "Computed circular layout");
        Ok(positions)
    }
}
