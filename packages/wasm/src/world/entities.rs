//! GraphWorldEntities - one immutable snapshot of the graph world.
//!
//! A snapshot pairs a vertex collection with an edge collection. Every edge
//! endpoint must name an existing vertex; constructors enforce this.

use std::rc::Rc;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::entity::{Edge, EntityCollection, RawCollection, Vertex};
use crate::error::{GraphResult, GraphWorldError};

/// Vertices plus edges of the graph world.
///
/// Both collections sit behind `Rc` so a vertex update shares the edge
/// collection with the previous snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GraphWorldEntities {
    vertices: Rc<EntityCollection<Vertex>>,
    edges: Rc<EntityCollection<Edge>>,
}

impl GraphWorldEntities {
    /// Build a snapshot, checking that every edge endpoint exists.
    pub fn new(
        vertices: EntityCollection<Vertex>,
        edges: EntityCollection<Edge>,
    ) -> GraphResult<Self> {
        for (_, edge) in edges.iter() {
            if !vertices.contains(&edge.source_id) {
                return Err(GraphWorldError::vertex_not_found(edge.source_id.as_str()));
            }
            if !vertices.contains(&edge.target_id) {
                return Err(GraphWorldError::vertex_not_found(edge.target_id.as_str()));
            }
        }

        Ok(Self {
            vertices: Rc::new(vertices),
            edges: Rc::new(edges),
        })
    }

    #[inline]
    pub fn vertices(&self) -> &EntityCollection<Vertex> {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &EntityCollection<Edge> {
        &self.edges
    }

    /// Copy-on-write replacement of one vertex state.
    ///
    /// The edge collection is shared with `self`.
    pub fn with_vertex(&self, id: &str, vertex: Vertex) -> GraphResult<Self> {
        let mut next = self.clone();
        next.set_vertex(id, vertex)?;
        Ok(next)
    }

    /// Replace one vertex state in place, copying only what another
    /// snapshot still shares.
    pub fn set_vertex(&mut self, id: &str, vertex: Vertex) -> GraphResult<()> {
        if !self.vertices.contains(id) {
            return Err(GraphWorldError::vertex_not_found(id));
        }
        Rc::make_mut(&mut self.vertices).set(id, vertex)
    }

    /// Serialize to the JSON interchange format.
    ///
    /// JSON has no NaN or infinity, so a snapshot holding such a position
    /// fails with [`GraphWorldError::NonFinitePosition`] instead of writing
    /// `null`.
    pub fn to_json(&self) -> GraphResult<String> {
        self.check_finite()?;
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty-printed variant of [`Self::to_json`].
    pub fn to_json_pretty(&self) -> GraphResult<String> {
        self.check_finite()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn check_finite(&self) -> GraphResult<()> {
        match self.vertices.iter().find(|(_, vertex)| !vertex.is_finite()) {
            Some((id, _)) => Err(GraphWorldError::NonFinitePosition { id: id.to_string() }),
            None => Ok(()),
        }
    }

    /// Parse the JSON interchange format.
    ///
    /// Collection and referential invariants are re-checked, so a document
    /// whose `ids` and `states` disagree or whose edges dangle is rejected
    /// with the corresponding typed error.
    pub fn from_json(text: &str) -> GraphResult<Self> {
        let document: EntitiesDocument = serde_json::from_str(text)?;
        document.validate()
    }
}

/// Unvalidated snapshot as it appears in an interchange document.
#[derive(Debug, Deserialize)]
struct EntitiesDocument {
    vertices: RawCollection<Vertex>,
    edges: RawCollection<Edge>,
}

impl EntitiesDocument {
    fn validate(self) -> GraphResult<GraphWorldEntities> {
        GraphWorldEntities::new(self.vertices.validate()?, self.edges.validate()?)
    }
}

impl<'de> Deserialize<'de> for GraphWorldEntities {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        EntitiesDocument::deserialize(deserializer)?
            .validate()
            .map_err(de::Error::custom)
    }
}
