//! Edge entity state.
//!
//! Edges are directed connections between two vertex ids. Edge ids are
//! formatted strings of the form `"<source>, <target>"`; [`edge_id`] is the
//! only place that builds them.

use serde::{Deserialize, Serialize};

use super::collection::Entity;
use crate::error::EntityKind;

/// Separator between the endpoint ids in an edge id.
pub const EDGE_ID_SEPARATOR: &str = ", ";

/// Build the id of the edge `source -> target`.
///
/// Ids are only unique while vertex ids never contain [`EDGE_ID_SEPARATOR`].
pub fn edge_id(source: &str, target: &str) -> String {
    let mut id = String::with_capacity(source.len() + EDGE_ID_SEPARATOR.len() + target.len());
    id.push_str(source);
    id.push_str(EDGE_ID_SEPARATOR);
    id.push_str(target);
    id
}

/// Directed connection between two vertices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub source_id: String,
    pub target_id: String,
}

impl Edge {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
        }
    }

    /// The id this edge gets under the default naming scheme.
    pub fn default_id(&self) -> String {
        edge_id(&self.source_id, &self.target_id)
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.source_id == self.target_id
    }
}

impl Entity for Edge {
    const KIND: EntityKind = EntityKind::Edge;
}
