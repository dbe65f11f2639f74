//! High-level operations built on the traversal engine.

pub mod shortest_paths;
pub mod walk;

pub use shortest_paths::{
    with_heuristic, Heuristic, SearchParams, SearchReport, ShortestPaths, Weighting,
};
pub use walk::{WalkEngine, WalkOrder, WalkParams, WalkResult};
