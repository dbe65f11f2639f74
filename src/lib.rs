//! fringe-graph: a graph topology store and a fringe-driven traversal engine.
//!
//! Directed and undirected graphs with recyclable vertex ids and
//! never-reused edge ids, plus one traversal loop that becomes BFS, DFS,
//! Dijkstra or A* depending on the fringe and visitor plugged into it.

pub mod engine;
pub mod graph;
pub mod index;
pub mod types;

// Re-export commonly used types at the crate root
pub use engine::{
    with_heuristic, SearchParams, SearchReport, ShortestPaths, WalkEngine, WalkOrder, WalkParams,
    WalkResult, Weighting,
};
pub use graph::{
    from_fn, Context, DirectedGraph, FifoFringe, Flow, Fringe, Graph, GraphBuilder, GraphSnapshot,
    LifoFringe, Outcome, PriorityFringe, Traversal, UndirectedGraph, Visitor, VisitState,
};
pub use types::{
    Directed, EdgeId, EdgeKind, EdgeRecord, GraphError, GraphResult, Orientation, Undirected,
    VertexId,
};
