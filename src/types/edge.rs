//! Edge records and the directed/undirected orientation markers.

use serde::{Deserialize, Serialize};

use super::{EdgeId, VertexId};

/// Directionality tag stored on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// `(from, to)` only; `to` is a successor of `from`.
    Directed = 1,
    /// `(from, to)` and `(to, from)` are the same edge.
    Undirected = 0,
}

impl EdgeKind {
    /// Return a human-readable name for this edge kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
        }
    }
}

/// One edge as the topology store records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Identity assigned at creation, never reused.
    pub id: EdgeId,
    /// Endpoint the edge was created from.
    pub from: VertexId,
    /// Endpoint the edge was created to.
    pub to: VertexId,
    /// Directed or undirected.
    pub kind: EdgeKind,
}

impl EdgeRecord {
    /// Create a new edge record.
    pub fn new(id: EdgeId, from: VertexId, to: VertexId, kind: EdgeKind) -> Self {
        Self { id, from, to, kind }
    }

    /// True if the edge starts and ends at the same vertex.
    pub fn is_self_edge(&self) -> bool {
        self.from == self.to
    }
}

/// Compile-time choice between directed and undirected graphs.
///
/// Both variants share one store; the marker only changes how edge keys are
/// normalized and how predecessors and in-degrees are answered.
pub trait Orientation: Copy + Default + std::fmt::Debug + 'static {
    /// Tag written on every edge of a graph with this orientation.
    const KIND: EdgeKind;

    /// True if the graph is directed.
    fn is_directed() -> bool {
        Self::KIND == EdgeKind::Directed
    }

    /// Lookup key for the logical edge `(u, v)`.
    fn key(u: VertexId, v: VertexId) -> (VertexId, VertexId) {
        if Self::is_directed() || u <= v {
            (u, v)
        } else {
            (v, u)
        }
    }
}

/// Marker for directed graphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directed;

/// Marker for undirected graphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Undirected;

impl Orientation for Directed {
    const KIND: EdgeKind = EdgeKind::Directed;
}

impl Orientation for Undirected {
    const KIND: EdgeKind = EdgeKind::Undirected;
}
