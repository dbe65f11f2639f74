//! Breadth-first and depth-first walks over the traversal engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::{Context, FifoFringe, Flow, Fringe, Graph, LifoFringe, Traversal, Visitor};
use crate::types::{GraphResult, Orientation, VertexId};

/// Which fringe drives the walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkOrder {
    /// FIFO fringe.
    #[default]
    BreadthFirst,
    /// LIFO fringe, with post-visits recorded as post-order.
    DepthFirst,
}

/// Parameters for a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkParams {
    /// Starting vertices, walked in the order given.
    pub starts: Vec<VertexId>,
    /// Breadth-first or depth-first.
    pub order: WalkOrder,
    /// Take successors in reverse adjacency order.
    pub reverse_successors: bool,
    /// Stop after visiting this many vertices.
    pub max_vertices: Option<usize>,
}

impl WalkParams {
    /// Breadth-first walk from one vertex.
    pub fn breadth_first(start: VertexId) -> Self {
        Self {
            starts: vec![start],
            order: WalkOrder::BreadthFirst,
            ..Self::default()
        }
    }

    /// Depth-first walk from one vertex.
    pub fn depth_first(start: VertexId) -> Self {
        Self {
            starts: vec![start],
            order: WalkOrder::DepthFirst,
            ..Self::default()
        }
    }
}

/// Result of a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalkResult {
    /// Vertices in the order they were visited.
    pub preorder: Vec<VertexId>,
    /// Vertices in the order their post-visits ran. Empty for breadth-first walks.
    pub postorder: Vec<VertexId>,
    /// Hops from a start vertex: the shortest hop count for breadth-first
    /// walks, the depth in the search tree for depth-first walks.
    pub depths: HashMap<VertexId, u32>,
    /// True if the walk stopped early because of `max_vertices`.
    pub truncated: bool,
}

/// Runs walks described by [`WalkParams`].
pub struct WalkEngine;

impl WalkEngine {
    /// Create a new walk engine.
    pub fn new() -> Self {
        Self
    }

    /// Walk `graph` as `params` describes.
    pub fn walk<O: Orientation>(
        &self,
        graph: &Graph<O>,
        params: &WalkParams,
    ) -> GraphResult<WalkResult> {
        match params.order {
            WalkOrder::BreadthFirst => run(graph, FifoFringe::new(), params),
            WalkOrder::DepthFirst => run(graph, LifoFringe::new(), params),
        }
    }

    /// Every vertex reachable from `start` (itself included), ascending.
    pub fn reachable<O: Orientation>(
        &self,
        graph: &Graph<O>,
        start: VertexId,
    ) -> GraphResult<Vec<VertexId>> {
        let mut reached = self.walk(graph, &WalkParams::breadth_first(start))?.preorder;
        reached.sort_unstable();
        Ok(reached)
    }
}

impl Default for WalkEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn run<O, F>(graph: &Graph<O>, fringe: F, params: &WalkParams) -> GraphResult<WalkResult>
where
    O: Orientation,
    F: Fringe,
{
    let depth_first = params.order == WalkOrder::DepthFirst;
    let mut walker = Walker {
        depth_first,
        // A LIFO fringe pops the last successor first, so flip to keep adjacency order.
        reverse: depth_first != params.reverse_successors,
        max_vertices: params.max_vertices,
        result: WalkResult::default(),
    };
    for &start in &params.starts {
        walker.result.depths.insert(start, 0);
    }

    let mut traversal = Traversal::new(graph, fringe);
    if depth_first {
        traversal.traverse(params.starts.iter().rev().copied(), &mut walker)?;
    } else {
        traversal.traverse(params.starts.iter().copied(), &mut walker)?;
    }

    log::debug!(
        "walk visited {} vertices (truncated: {})",
        walker.result.preorder.len(),
        walker.result.truncated
    );
    Ok(walker.result)
}

struct Walker {
    depth_first: bool,
    reverse: bool,
    max_vertices: Option<usize>,
    result: WalkResult,
}

impl<O: Orientation, F: Fringe> Visitor<O, F> for Walker {
    fn visit(&mut self, _cx: &mut Context<'_, O, F>, v: VertexId) -> Flow {
        if let Some(max) = self.max_vertices {
            if self.result.preorder.len() >= max {
                self.result.truncated = true;
                return Flow::Stop;
            }
        }
        self.result.preorder.push(v);
        Flow::Continue
    }

    fn should_post_visit(&self, _v: VertexId) -> bool {
        self.depth_first
    }

    fn post_visit(&mut self, _cx: &mut Context<'_, O, F>, v: VertexId) -> Flow {
        self.result.postorder.push(v);
        Flow::Continue
    }

    fn reverse_successors(&self, _v: VertexId) -> bool {
        self.reverse
    }

    fn process_successor(&mut self, from: VertexId, to: VertexId, marked: bool) -> bool {
        if marked {
            return false;
        }
        let depth = self.result.depths.get(&from).copied().unwrap_or(0) + 1;
        if self.depth_first {
            // The last push of an unmarked vertex is the one that pops first.
            self.result.depths.insert(to, depth);
        } else {
            self.result.depths.entry(to).or_insert(depth);
        }
        true
    }
}
