//! Vertex entity state.
//!
//! A vertex is a position in graph space. Its id lives in the owning
//! [`EntityCollection`](super::EntityCollection), not in the state itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::collection::Entity;
use crate::error::{EntityKind, GraphWorldError};

/// Position of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite, so the position survives JSON.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Read a numeric attribute.
    #[inline]
    pub fn attribute(&self, attribute: VertexAttribute) -> f64 {
        match attribute {
            VertexAttribute::X => self.x,
            VertexAttribute::Y => self.y,
        }
    }
}

impl Entity for Vertex {
    const KIND: EntityKind = EntityKind::Vertex;
}

impl From<(f64, f64)> for Vertex {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Node attributes readable through the graph adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribute {
    X,
    Y,
}

impl VertexAttribute {
    pub fn name(self) -> &'static str {
        match self {
            VertexAttribute::X => "x",
            VertexAttribute::Y => "y",
        }
    }
}

impl fmt::Display for VertexAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VertexAttribute {
    type Err = GraphWorldError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "x" => Ok(VertexAttribute::X),
            "y" => Ok(VertexAttribute::Y),
            other => Err(GraphWorldError::NotImplemented(other.to_string())),
        }
    }
}
