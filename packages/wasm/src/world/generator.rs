//! Procedural random graph generator.
//!
//! Produces a [`GraphWorldEntities`] snapshot with uniformly placed vertices
//! and a directed Erdős–Rényi style edge set:
//!
//! 1. `vertex_amount` vertices, x then y drawn per vertex, ids `"0"`, `"1"`, ...
//! 2. One draw per ordered pair `(i, j)`, `i != j`, outer loop over `i`. The
//!    edge `i -> j` is created when the draw exceeds `1 - edge_probability`.
//! 3. Edge ids are `"<i>, <j>"`.
//!
//! Output is fully determined by the [`UnitSource`] sequence.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::entities::GraphWorldEntities;
use crate::entity::{Edge, EntityCollection, Vertex, edge_id};
use crate::error::{GraphResult, GraphWorldError};
use crate::random::{UnitSource, random_in_range, validate_range};

/// Default chance that an ordered vertex pair gets an edge.
pub const DEFAULT_EDGE_PROBABILITY: f64 = 0.1;

/// How the reverse direction of an existing edge is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgePolicy {
    /// Every ordered pair is decided independently; `i -> j` and `j -> i`
    /// may both exist.
    #[default]
    Independent,
    /// `i -> j` is skipped when `j -> i` was already created. The pair still
    /// consumes its draw.
    SkipReverse,
}

/// Configuration for the random graph generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RandomGraphConfig {
    /// Number of vertices to generate (default: 10).
    pub vertex_amount: usize,
    /// Inclusive lower x bound (default: 0.0).
    pub x_min: f64,
    /// Exclusive upper x bound (default: 512.0).
    pub x_max: f64,
    /// Inclusive lower y bound (default: 0.0).
    pub y_min: f64,
    /// Exclusive upper y bound (default: 512.0).
    pub y_max: f64,
    /// Chance per ordered pair of creating an edge (default: 0.1).
    pub edge_probability: f64,
    /// Reverse-edge policy (default: independent).
    pub edge_policy: EdgePolicy,
}

impl Default for RandomGraphConfig {
    fn default() -> Self {
        Self {
            vertex_amount: 10,
            x_min: 0.0,
            x_max: 512.0,
            y_min: 0.0,
            y_max: 512.0,
            edge_probability: DEFAULT_EDGE_PROBABILITY,
            edge_policy: EdgePolicy::Independent,
        }
    }
}

impl RandomGraphConfig {
    /// Config for `vertex_amount` vertices inside the given rectangle.
    pub fn new(vertex_amount: usize, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            vertex_amount,
            x_min,
            x_max,
            y_min,
            y_max,
            ..Self::default()
        }
    }

    pub fn with_edge_probability(mut self, edge_probability: f64) -> Self {
        self.edge_probability = edge_probability;
        self
    }

    pub fn with_edge_policy(mut self, edge_policy: EdgePolicy) -> Self {
        self.edge_policy = edge_policy;
        self
    }

    /// Check bounds and probability.
    pub fn validate(&self) -> GraphResult<()> {
        validate_range("x", self.x_min, self.x_max)?;
        validate_range("y", self.y_min, self.y_max)?;
        if !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(GraphWorldError::InvalidConfig(format!(
                "edge_probability must be within [0, 1], got {}",
                self.edge_probability
            )));
        }
        Ok(())
    }
}

impl GraphWorldEntities {
    /// Generate a random graph world with the default edge probability and
    /// independent edge policy.
    pub fn create_with_random(
        vertex_amount: usize,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        source: &mut impl UnitSource,
    ) -> GraphResult<Self> {
        let config = RandomGraphConfig::new(vertex_amount, x_min, x_max, y_min, y_max);
        Self::create_with_config(&config, source)
    }

    /// Generate a random graph world from a full configuration.
    pub fn create_with_config(
        config: &RandomGraphConfig,
        source: &mut impl UnitSource,
    ) -> GraphResult<Self> {
        config.validate()?;

        let n = config.vertex_amount;
        let mut vertices = Vec::with_capacity(n);
        for i in 0..n {
            let x = random_in_range(source, config.x_min, config.x_max);
            let y = random_in_range(source, config.y_min, config.y_max);
            vertices.push((i.to_string(), Vertex::new(x, y)));
        }

        let threshold = 1.0 - config.edge_probability;
        let mut created: HashSet<(usize, usize)> = HashSet::new();
        let mut edges = Vec::new();

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let draw = source.next_unit();
                if draw <= threshold {
                    continue;
                }
                if config.edge_policy == EdgePolicy::SkipReverse && created.contains(&(j, i)) {
                    continue;
                }
                created.insert((i, j));

                let source_id = &vertices[i].0;
                let target_id = &vertices[j].0;
                edges.push((
                    edge_id(source_id, target_id),
                    Edge::new(source_id.as_str(), target_id.as_str()),
                ));
            }
        }

        debug!(
            vertex_amount = n,
            edge_count = edges.len(),
            edge_policy = ?config.edge_policy,
            "Generated random graph world"
        );

        Self::new(EntityCollection::create(vertices)?, EntityCollection::create(edges)?)
    }
}
