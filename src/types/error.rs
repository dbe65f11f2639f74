//! Error types for the fringe-graph library.

use thiserror::Error;

use super::VertexId;

/// All errors that can occur in the fringe-graph library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An operation that requires a live vertex was given one that is not in the graph.
    #[error("Vertex {0} is not in the graph")]
    InvalidVertex(VertexId),

    /// No predecessor chain leads from the source to this vertex.
    #[error("Vertex {0} is not reachable from the source")]
    Unreachable(VertexId),

    /// A destination path was requested but no destination was configured.
    #[error("No destination vertex configured")]
    NoDestination,

    /// Parts handed to `from_parts` or `from_snapshot` do not describe a valid graph.
    #[error("Invalid graph snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Convenience result type for fringe-graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
