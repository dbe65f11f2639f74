//! In-memory graph operations: the topology store and the traversal engine.

pub mod builder;
pub mod fringe;
pub mod topology;
pub mod traversal;

pub use builder::{GraphBuilder, GraphSnapshot};
pub use fringe::{FifoFringe, Fringe, LifoFringe, PriorityFringe};
pub use topology::{DirectedGraph, Graph, UndirectedGraph};
pub use traversal::{from_fn, Context, Flow, FnVisitor, Outcome, Traversal, Visitor, VisitState};
