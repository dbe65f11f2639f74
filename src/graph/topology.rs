//! Core graph structure: vertex slots + edges with adjacency indexes.

use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;

use crate::index::VertexSlots;
use crate::types::{
    Directed, EdgeId, EdgeRecord, GraphError, GraphResult, Orientation, Undirected, VertexId,
    FIRST_ID,
};

/// A graph whose edges are all directed.
pub type DirectedGraph = Graph<Directed>;

/// A graph whose edges are all undirected.
pub type UndirectedGraph = Graph<Undirected>;

/// The topology store: which vertices and edges exist, and their identities.
///
/// Vertices are positive ids handed out by [`VertexSlots`] (lowest free id
/// first). Edges get ids from a counter that only moves forward, so edge ids
/// reflect creation order even after removals.
///
/// Adjacency lists are indexed by vertex id and kept in edge-creation order.
/// For an undirected graph only `successors` is populated, and an edge
/// `(u, v)` appears in both `successors[u]` and `successors[v]` (once when
/// `u == v`).
#[derive(Debug, Clone)]
pub struct Graph<O: Orientation = Directed> {
    /// Live/free vertex slots.
    slots: VertexSlots,
    /// Outgoing adjacency (all adjacency for undirected graphs).
    successors: Vec<Vec<VertexId>>,
    /// Incoming adjacency. Unused for undirected graphs.
    predecessors: Vec<Vec<VertexId>>,
    /// Normalized `(from, to)` key -> edge id.
    edge_index: HashMap<(VertexId, VertexId), EdgeId>,
    /// All edges, by id (therefore in creation order).
    edges: BTreeMap<EdgeId, EdgeRecord>,
    /// Next edge id to hand out.
    next_edge_id: EdgeId,
    _orientation: PhantomData<O>,
}

impl<O: Orientation> Graph<O> {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-allocate for a known number of vertices.
    pub fn with_capacity(vertices: usize) -> Self {
        let mut successors = Vec::with_capacity(vertices + 1);
        successors.push(Vec::new());
        let mut predecessors = Vec::new();
        if O::is_directed() {
            predecessors.reserve(vertices + 1);
            predecessors.push(Vec::new());
        }
        Self {
            slots: VertexSlots::with_capacity(vertices),
            successors,
            predecessors,
            edge_index: HashMap::new(),
            edges: BTreeMap::new(),
            next_edge_id: FIRST_ID,
            _orientation: PhantomData,
        }
    }

    /// Create from pre-existing ids (used by the builder and snapshots).
    ///
    /// Free slots are the gaps below the greatest vertex id, and the edge
    /// counter resumes after the greatest edge id.
    pub fn from_parts(vertices: Vec<VertexId>, edges: Vec<EdgeRecord>) -> GraphResult<Self> {
        let slots = VertexSlots::from_ids(vertices).map_err(|id| {
            GraphError::InvalidSnapshot(format!("vertex id {} is zero, repeated or out of range", id))
        })?;

        let mut graph = Self::new();
        graph.slots = slots;
        graph.resize_adjacency();

        let mut sorted_edges = edges;
        sorted_edges.sort_by_key(|e| e.id);

        for edge in sorted_edges {
            if edge.id < FIRST_ID || graph.edges.contains_key(&edge.id) {
                return Err(GraphError::InvalidSnapshot(format!(
                    "edge id {} is zero or repeated",
                    edge.id
                )));
            }
            if edge.kind != O::KIND {
                return Err(GraphError::InvalidSnapshot(format!(
                    "edge {} is {} but the graph is {}",
                    edge.id,
                    edge.kind.name(),
                    O::KIND.name()
                )));
            }
            graph.check_vertex(edge.from)?;
            graph.check_vertex(edge.to)?;
            if graph.contains_edge(edge.from, edge.to) {
                return Err(GraphError::InvalidSnapshot(format!(
                    "edge ({}, {}) appears twice",
                    edge.from, edge.to
                )));
            }
            graph.link(edge);
            graph.next_edge_id = edge.id + 1;
        }

        Ok(graph)
    }

    /// True if the graph is directed.
    pub fn is_directed(&self) -> bool {
        O::is_directed()
    }

    /// Number of live vertices.
    pub fn vertex_size(&self) -> usize {
        self.slots.len()
    }

    /// Greatest live vertex id, or 0 if the graph has no vertices.
    pub fn max_vertex(&self) -> VertexId {
        self.slots.max()
    }

    /// Number of edges.
    pub fn edge_size(&self) -> usize {
        self.edges.len()
    }

    /// The id the next new edge will receive.
    pub fn next_edge_id(&self) -> EdgeId {
        self.next_edge_id
    }

    /// Move the edge counter forward to `next`. Never moves it back.
    pub(crate) fn resume_edge_ids(&mut self, next: EdgeId) {
        self.next_edge_id = self.next_edge_id.max(next);
    }

    /// True if `v` is a live vertex.
    pub fn contains(&self, v: VertexId) -> bool {
        self.slots.contains(v)
    }

    /// True if the edge `(u, v)` exists. For undirected graphs this is
    /// the same question as `(v, u)`.
    pub fn contains_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.edge_index.contains_key(&O::key(u, v))
    }

    /// Fail with `InvalidVertex` unless `v` is live.
    pub fn check_vertex(&self, v: VertexId) -> GraphResult<()> {
        if self.contains(v) {
            Ok(())
        } else {
            Err(GraphError::InvalidVertex(v))
        }
    }

    /// Add a vertex, returning its id. Reuses the lowest free id if there is one.
    pub fn add_vertex(&mut self) -> VertexId {
        let id = self.slots.allocate();
        self.resize_adjacency();
        log::trace!("added vertex {}", id);
        id
    }

    /// Add the edge `(u, v)` and return its id. If it already exists, return
    /// the existing id without creating anything.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> GraphResult<EdgeId> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        if let Some(id) = self.edge_id(u, v) {
            return Ok(id);
        }

        let id = self.next_edge_id;
        self.next_edge_id += 1;
        self.link(EdgeRecord::new(id, u, v, O::KIND));
        log::trace!("added edge {} ({}, {})", id, u, v);
        Ok(id)
    }

    /// Remove a vertex and every edge touching it. Returns false if `v` was
    /// not in the graph.
    pub fn remove_vertex(&mut self, v: VertexId) -> bool {
        if !self.contains(v) {
            return false;
        }

        let mut incident: Vec<(VertexId, VertexId)> = self.successors[v as usize]
            .iter()
            .map(|&w| (v, w))
            .collect();
        if O::is_directed() {
            incident.extend(
                self.predecessors[v as usize]
                    .iter()
                    .filter(|&&u| u != v)
                    .map(|&u| (u, v)),
            );
        }

        let removed = incident
            .into_iter()
            .filter(|&(from, to)| self.remove_edge(from, to).is_some())
            .count();

        self.slots.release(v);
        self.resize_adjacency();
        log::debug!(
            "removed vertex {} and {} incident edge(s); max vertex is now {}",
            v,
            removed,
            self.max_vertex()
        );
        true
    }

    /// Remove the edge `(u, v)` (or `(v, u)` when undirected). Returns the id
    /// of the removed edge, or None if there was no such edge.
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Option<EdgeId> {
        let id = self.edge_index.remove(&O::key(u, v))?;
        let record = self.edges.remove(&id)?;
        let (from, to) = (record.from, record.to);

        detach(&mut self.successors[from as usize], to);
        if O::is_directed() {
            detach(&mut self.predecessors[to as usize], from);
        } else if from != to {
            detach(&mut self.successors[to as usize], from);
        }

        log::trace!("removed edge {} ({}, {})", id, from, to);
        Some(id)
    }

    /// Id of the edge `(u, v)`, or None if there is no such edge.
    pub fn edge_id(&self, u: VertexId, v: VertexId) -> Option<EdgeId> {
        self.edge_index.get(&O::key(u, v)).copied()
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&EdgeRecord> {
        self.edges.get(&id)
    }

    /// All live vertex ids, ascending.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.slots.iter()
    }

    /// All edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeRecord> + '_ {
        self.edges.values()
    }

    /// Successors of `v` in edge-creation order. Empty if `v` is not live.
    pub fn successors(&self, v: VertexId) -> impl DoubleEndedIterator<Item = VertexId> + '_ {
        self.successor_list(v).iter().copied()
    }

    /// Predecessors of `v` in edge-creation order. Same as `successors` for
    /// undirected graphs.
    pub fn predecessors(&self, v: VertexId) -> impl DoubleEndedIterator<Item = VertexId> + '_ {
        self.predecessor_list(v).iter().copied()
    }

    /// The `k`-th successor of `v` (0-indexed), or None if out of range.
    pub fn successor(&self, v: VertexId, k: usize) -> Option<VertexId> {
        self.successor_list(v).get(k).copied()
    }

    /// The `k`-th predecessor of `v` (0-indexed), or None if out of range.
    pub fn predecessor(&self, v: VertexId, k: usize) -> Option<VertexId> {
        self.predecessor_list(v).get(k).copied()
    }

    /// Number of edges leaving `v`; for undirected graphs, the number of
    /// incident edges with a self-edge counted once.
    pub fn out_degree(&self, v: VertexId) -> usize {
        self.successor_list(v).len()
    }

    /// Number of edges entering `v`. Equal to `out_degree` when undirected.
    pub fn in_degree(&self, v: VertexId) -> usize {
        self.predecessor_list(v).len()
    }

    /// Same as `out_degree`.
    pub fn degree(&self, v: VertexId) -> usize {
        self.out_degree(v)
    }

    fn successor_list(&self, v: VertexId) -> &[VertexId] {
        if !self.contains(v) {
            return &[];
        }
        &self.successors[v as usize]
    }

    fn predecessor_list(&self, v: VertexId) -> &[VertexId] {
        if !O::is_directed() {
            return self.successor_list(v);
        }
        if !self.contains(v) {
            return &[];
        }
        &self.predecessors[v as usize]
    }

    /// Record an edge whose id has already been decided.
    fn link(&mut self, edge: EdgeRecord) {
        let (from, to) = (edge.from, edge.to);
        self.successors[from as usize].push(to);
        if O::is_directed() {
            self.predecessors[to as usize].push(from);
        } else if from != to {
            self.successors[to as usize].push(from);
        }
        self.edge_index.insert(O::key(from, to), edge.id);
        self.edges.insert(edge.id, edge);
    }

    /// Keep adjacency tables the same length as the slot table.
    fn resize_adjacency(&mut self) {
        let len = self.slots.table_len();
        self.successors.resize_with(len, Vec::new);
        if O::is_directed() {
            self.predecessors.resize_with(len, Vec::new);
        }
    }
}

impl<O: Orientation> Default for Graph<O> {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove the first occurrence of `v` from an adjacency list, keeping order.
fn detach(list: &mut Vec<VertexId>, v: VertexId) {
    if let Some(pos) = list.iter().position(|&w| w == v) {
        list.remove(pos);
    }
}
