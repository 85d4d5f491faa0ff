//! Per-frame draw buffers.
//!
//! A renderer calls [`FrameBuffers::collect`] once per animation frame. It
//! only reads through [`GraphView`]: node ids and their `x`/`y` attributes,
//! then edge ids with their endpoints. The buffers use the interleaved layout
//! canvas and GPU code want:
//!
//! - `nodes`: `[x0, y0, x1, y1, ...]`
//! - `segments`: `[sx0, sy0, tx0, ty0, sx1, ...]`

use crate::error::GraphResult;
use crate::graph::GraphView;

/// Flat position buffers for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameBuffers {
    pub nodes: Vec<f32>,
    pub segments: Vec<f32>,
}

impl FrameBuffers {
    /// Read the current node positions and edge segments of `graph`.
    pub fn collect(graph: &impl GraphView) -> GraphResult<Self> {
        let node_ids = graph.nodes();
        let mut nodes = Vec::with_capacity(node_ids.len() * 2);
        for id in node_ids.iter() {
            nodes.push(graph.get_attribute(id, "x")? as f32);
            nodes.push(graph.get_attribute(id, "y")? as f32);
        }

        let edge_ids = graph.edges();
        let mut segments = Vec::with_capacity(edge_ids.len() * 4);
        for edge in edge_ids.iter() {
            let source = graph.source(edge)?;
            let target = graph.target(edge)?;
            segments.push(graph.get_attribute(&source, "x")? as f32);
            segments.push(graph.get_attribute(&source, "y")? as f32);
            segments.push(graph.get_attribute(&target, "x")? as f32);
            segments.push(graph.get_attribute(&target, "y")? as f32);
        }

        Ok(Self { nodes, segments })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len() / 2
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len() / 4
    }

    /// Bounding box of the node positions as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        if self.nodes.is_empty() {
            return None;
        }

        let mut min_x = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        for point in self.nodes.chunks_exact(2) {
            let (x, y) = (point[0], point[1]);
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        Some((min_x, min_y, max_x, max_y))
    }
}
