//! All shared data types for the fringe-graph library.

pub mod edge;
pub mod error;

pub use edge::{Directed, EdgeKind, EdgeRecord, Orientation, Undirected};
pub use error::{GraphError, GraphResult};

/// Identity of a live vertex. Positive; reusable after the vertex is removed.
pub type VertexId = u64;

/// Identity of an edge. Positive; assigned once and never reused.
pub type EdgeId = u64;

/// First identity handed out for vertices and edges. 0 is never issued.
pub const FIRST_ID: u64 = 1;

/// Greatest vertex id a rebuilt graph may contain. Vertex tables are indexed
/// by id, so larger ids in a snapshot are rejected.
pub const MAX_VERTEX_ID: VertexId = u32::MAX as VertexId;
