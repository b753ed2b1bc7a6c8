//! Error taxonomy for graph mutation and change-tracked iteration.
//!
//! Only mutation and iteration can fail. Lookups report absence with
//! `Option`, and deletions are idempotent no-ops on missing targets, so
//! neither appears here.

use thiserror::Error;

use crate::graph::VertexId;

/// Errors surfaced by graph mutation and change-tracked iteration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge endpoint does not refer to a valid vertex slot.
    #[error("edge endpoint {0} is not a valid vertex")]
    InvalidEndpoint(VertexId),

    /// An edge would connect a vertex to itself.
    #[error("cannot add an edge from vertex {0} to itself")]
    SelfLoop(VertexId),

    /// A vertex with this name already exists.
    #[error("a vertex named {0:?} already exists")]
    DuplicateName(String),

    /// A name-addressed mutation referenced a name with no vertex.
    #[error("no vertex named {0:?}")]
    UnknownName(String),

    /// The graph was structurally modified while a cursor was live.
    #[error("graph structure changed during iteration")]
    StructureChanged,
}

/// Convenience alias for fallible graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
