//! Fluent API for building graphs, and serializable topology snapshots.

use serde::{Deserialize, Serialize};

use crate::types::{EdgeId, EdgeRecord, GraphError, GraphResult, Orientation, VertexId};

use super::Graph;

/// Fluent builder for constructing a graph from vertex counts and links.
///
/// Vertices are numbered 1, 2, 3, ... in the order they are added, exactly as
/// a fresh graph would number them.
#[derive(Debug, Clone)]
pub struct GraphBuilder<O: Orientation> {
    vertex_count: u64,
    links: Vec<(VertexId, VertexId)>,
    graph: std::marker::PhantomData<O>,
}

impl<O: Orientation> GraphBuilder<O> {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self {
            vertex_count: 0,
            links: Vec::new(),
            graph: std::marker::PhantomData,
        }
    }

    /// Create a builder that starts with `n` vertices (ids `1..=n`).
    pub fn with_vertices(n: u64) -> Self {
        let mut builder = Self::new();
        builder.vertex_count = n;
        builder
    }

    /// Add one more vertex, returning the id it will have.
    pub fn add_vertex(&mut self) -> VertexId {
        self.vertex_count += 1;
        self.vertex_count
    }

    /// Add an edge between two vertices.
    pub fn link(&mut self, from: VertexId, to: VertexId) -> &mut Self {
        self.links.push((from, to));
        self
    }

    /// Add a chain of edges `path[0] -> path[1] -> ...`.
    pub fn path(&mut self, path: &[VertexId]) -> &mut Self {
        for pair in path.windows(2) {
            self.links.push((pair[0], pair[1]));
        }
        self
    }

    /// Build the final graph. Links are added in the order given, so edge ids
    /// follow that order (repeated links keep their first id).
    pub fn build(&self) -> GraphResult<Graph<O>> {
        let mut graph = Graph::with_capacity(self.vertex_count as usize);
        for _ in 0..self.vertex_count {
            graph.add_vertex();
        }
        for &(from, to) in &self.links {
            graph.add_edge(from, to)?;
        }
        Ok(graph)
    }
}

impl<O: Orientation> Default for GraphBuilder<O> {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of a graph's topology, ids included.
///
/// This is what a payload decorator persists next to its own data so that
/// both can be restored with matching ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Whether the edges are directed.
    pub directed: bool,
    /// Live vertex ids, ascending.
    pub vertices: Vec<VertexId>,
    /// Edges in creation order.
    pub edges: Vec<EdgeRecord>,
    /// The id the next new edge will receive.
    pub next_edge_id: EdgeId,
}

impl<O: Orientation> Graph<O> {
    /// Capture the current topology.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            directed: self.is_directed(),
            vertices: self.vertices().collect(),
            edges: self.edges().copied().collect(),
            next_edge_id: self.next_edge_id(),
        }
    }

    /// Restore a graph from a snapshot taken with `snapshot`.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> GraphResult<Self> {
        if snapshot.directed != O::is_directed() {
            return Err(GraphError::InvalidSnapshot(format!(
                "snapshot is {} but the graph is {}",
                if snapshot.directed {
                    "directed"
                } else {
                    "undirected"
                },
                O::KIND.name()
            )));
        }
        let mut graph = Self::from_parts(snapshot.vertices, snapshot.edges)?;
        if snapshot.next_edge_id < graph.next_edge_id() {
            return Err(GraphError::InvalidSnapshot(format!(
                "next edge id {} is not above the last edge id",
                snapshot.next_edge_id
            )));
        }
        graph.resume_edge_ids(snapshot.next_edge_id);
        Ok(graph)
    }
}
