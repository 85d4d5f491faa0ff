//! Error types for graph world operations.
//!
//! Every fallible operation in the crate returns [`GraphResult`]. Lookups
//! never fall back to a default value; a missing id is always surfaced as
//! [`GraphWorldError::NotFound`].

use std::fmt;

use thiserror::Error;

/// Result type alias for graph world operations.
pub type GraphResult<T> = Result<T, GraphWorldError>;

/// Which entity collection an id was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Vertex,
    Edge,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Vertex => f.write_str("vertex"),
            EntityKind::Edge => f.write_str("edge"),
        }
    }
}

/// Error type for all graph world operations.
#[derive(Error, Debug)]
pub enum GraphWorldError {
    /// Two entries passed to a collection share the same id.
    #[error("Duplicate {kind} id: {id:?}")]
    DuplicateId { kind: EntityKind, id: String },

    /// An id is absent from the collection it was looked up in.
    #[error("{kind} not found: {id:?}")]
    NotFound { kind: EntityKind, id: String },

    /// Node attribute other than `x` or `y`.
    #[error("Node attribute not implemented: {0:?}")]
    NotImplemented(String),

    /// Invalid generator or layout configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A vertex position that JSON cannot represent (NaN or infinite).
    #[error("Non-finite position for vertex {id:?}")]
    NonFinitePosition { id: String },

    /// A deserialized collection whose `ids` and `states` disagree.
    #[error("Collection ids and states disagree at {id:?}")]
    CollectionMismatch { id: String },

    /// Interchange document could not be parsed or written.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GraphWorldError {
    pub(crate) fn vertex_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: EntityKind::Vertex,
            id: id.into(),
        }
    }

    /// Check if this is a [`GraphWorldError::NotFound`] error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
