//! Dijkstra and A* over the traversal engine.
//!
//! A [`PriorityFringe`] keyed by `distance + estimated_distance` drives a
//! [`Traversal`]; the visitor relaxes the outgoing edges of each vertex it is
//! handed and decrease-keys every successor whose distance improved. When a
//! destination is set, the walk stops as soon as that vertex leaves the fringe,
//! at which point its distance is final (non-negative weights, admissible
//! heuristic). Vertices never reached keep an infinite distance.

use serde::{Deserialize, Serialize};

use crate::graph::{Context, Flow, Graph, Outcome, PriorityFringe, Traversal, Visitor};
use crate::types::{GraphError, GraphResult, Orientation, VertexId};

/// Edge weights and the optional A* estimate.
///
/// Weights must be non-negative; this is assumed, not checked. The estimate
/// must never exceed the true remaining distance to the destination,
/// otherwise the path found may not be the shortest.
pub trait Weighting {
    /// Weight of the edge `(from, to)`.
    fn weight(&self, from: VertexId, to: VertexId) -> f64;

    /// Estimated distance from `v` to the destination. 0 (plain Dijkstra) by default.
    fn estimated_distance(&self, _v: VertexId) -> f64 {
        0.0
    }
}

impl<F> Weighting for F
where
    F: Fn(VertexId, VertexId) -> f64,
{
    fn weight(&self, from: VertexId, to: VertexId) -> f64 {
        self(from, to)
    }
}

/// Weights plus an A* heuristic; see [`with_heuristic`].
pub struct Heuristic<W, H> {
    weights: W,
    heuristic: H,
}

/// Combine edge weights with a heuristic to run A* instead of Dijkstra.
pub fn with_heuristic<W, H>(weights: W, heuristic: H) -> Heuristic<W, H>
where
    W: Weighting,
    H: Fn(VertexId) -> f64,
{
    Heuristic { weights, heuristic }
}

impl<W, H> Weighting for Heuristic<W, H>
where
    W: Weighting,
    H: Fn(VertexId) -> f64,
{
    fn weight(&self, from: VertexId, to: VertexId) -> f64 {
        self.weights.weight(from, to)
    }

    fn estimated_distance(&self, v: VertexId) -> f64 {
        (self.heuristic)(v)
    }
}

/// Parameters for a shortest-path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Where every path starts.
    pub source: VertexId,
    /// Stop once this vertex is settled. None computes paths to everything reachable.
    pub destination: Option<VertexId>,
}

impl SearchParams {
    /// Search from `source` to every reachable vertex.
    pub fn new(source: VertexId) -> Self {
        Self {
            source,
            destination: None,
        }
    }

    /// Stop as soon as `destination` is settled.
    pub fn with_destination(mut self, destination: VertexId) -> Self {
        self.destination = Some(destination);
        self
    }
}

/// Counters from one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// Number of visits (a vertex reopened by an inconsistent heuristic counts again).
    pub visited: usize,
    /// Number of successful relaxations.
    pub relaxations: usize,
    /// True if the search stopped at its destination.
    pub reached_destination: bool,
}

/// Result tables of a shortest-path search.
///
/// `distance` and `predecessor` are indexed directly by vertex id and sized
/// to the graph's `max_vertex` at the time of the search.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: VertexId,
    destination: Option<VertexId>,
    distance: Vec<f64>,
    predecessor: Vec<Option<VertexId>>,
    report: SearchReport,
}

impl ShortestPaths {
    /// Run Dijkstra (or A*, if `weights` supplies an estimate) over `graph`.
    pub fn compute<O, W>(graph: &Graph<O>, params: &SearchParams, weights: &W) -> GraphResult<Self>
    where
        O: Orientation,
        W: Weighting,
    {
        graph.check_vertex(params.source)?;
        if let Some(destination) = params.destination {
            graph.check_vertex(destination)?;
        }

        let slots = graph.max_vertex() as usize + 1;
        let mut paths = Self {
            source: params.source,
            destination: params.destination,
            distance: vec![f64::INFINITY; slots],
            predecessor: vec![None; slots],
            report: SearchReport::default(),
        };
        paths.distance[params.source as usize] = 0.0;

        let mut fringe = PriorityFringe::with_capacity(graph.max_vertex());
        fringe.set_priority(params.source, weights.estimated_distance(params.source));

        let mut traversal = Traversal::new(graph, fringe);
        let mut relaxation = Relaxation {
            paths: &mut paths,
            weights,
        };
        let outcome = traversal.traverse_from(params.source, &mut relaxation)?;

        paths.report.reached_destination = matches!(
            (outcome, params.destination),
            (Outcome::Stopped(v), Some(d)) if v == d && paths.is_reached(d)
        );
        log::debug!(
            "shortest paths from {}: {} visits, {} relaxations, destination reached: {}",
            paths.source,
            paths.report.visited,
            paths.report.relaxations,
            paths.report.reached_destination
        );
        Ok(paths)
    }

    /// The starting vertex.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// The destination vertex, if one was configured.
    pub fn destination(&self) -> Option<VertexId> {
        self.destination
    }

    /// Best known distance from the source to `v`; `+inf` if `v` was never
    /// reached or is not in the graph.
    pub fn distance(&self, v: VertexId) -> f64 {
        self.distance
            .get(v as usize)
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// The vertex before `v` on its best known path, or None.
    pub fn predecessor(&self, v: VertexId) -> Option<VertexId> {
        self.predecessor.get(v as usize).copied().flatten()
    }

    /// True if some path from the source to `v` was found.
    pub fn is_reached(&self, v: VertexId) -> bool {
        self.distance(v).is_finite()
    }

    /// Every reached vertex with its distance, in ascending id order.
    pub fn distances(&self) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.distance
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_finite())
            .map(|(v, &d)| (v as VertexId, d))
    }

    /// Counters from the search.
    pub fn report(&self) -> SearchReport {
        self.report
    }

    /// Vertices from the source to `v`, following predecessors back from `v`.
    ///
    /// Any `v` the search did not reach, including ids added to the graph
    /// after the search, fails with `Unreachable`. Only id 0, which is never
    /// a vertex, fails with `InvalidVertex`.
    ///
    /// When a destination was configured, only paths to the destination (and
    /// to vertices settled before it) are guaranteed to be shortest.
    pub fn path_to(&self, v: VertexId) -> GraphResult<Vec<VertexId>> {
        if v == self.source {
            return Ok(vec![v]);
        }
        if v == 0 {
            return Err(GraphError::InvalidVertex(v));
        }

        let mut path = vec![v];
        let mut current = v;
        while current != self.source {
            match self.predecessor(current) {
                // A chain longer than the table would mean a cycle.
                Some(previous) if path.len() < self.distance.len() => {
                    path.push(previous);
                    current = previous;
                }
                _ => return Err(GraphError::Unreachable(v)),
            }
        }
        path.reverse();
        Ok(path)
    }

    /// Vertices from the source to the configured destination.
    pub fn path(&self) -> GraphResult<Vec<VertexId>> {
        let destination = self.destination.ok_or(GraphError::NoDestination)?;
        self.path_to(destination)
    }
}

/// The relaxation visitor that turns a traversal into Dijkstra/A*.
struct Relaxation<'a, W> {
    paths: &'a mut ShortestPaths,
    weights: &'a W,
}

impl<O, W> Visitor<O, PriorityFringe> for Relaxation<'_, W>
where
    O: Orientation,
    W: Weighting,
{
    fn visit(&mut self, cx: &mut Context<'_, O, PriorityFringe>, v: VertexId) -> Flow {
        self.paths.report.visited += 1;
        if self.paths.destination == Some(v) {
            return Flow::Stop;
        }

        let graph = cx.graph();
        let base = self.paths.distance(v);
        for to in graph.successors(v) {
            let candidate = base + self.weights.weight(v, to);
            if candidate < self.paths.distance(to) {
                self.paths.distance[to as usize] = candidate;
                self.paths.predecessor[to as usize] = Some(v);
                self.paths.report.relaxations += 1;
                if cx.is_marked(to) {
                    // Only an inconsistent heuristic can improve a visited vertex.
                    log::trace!("reopening vertex {} at distance {}", to, candidate);
                    cx.reopen(to);
                }
                cx.fringe()
                    .insert_with(to, candidate + self.weights.estimated_distance(to));
            }
        }
        Flow::Continue
    }

    fn process_successor(&mut self, _from: VertexId, to: VertexId, marked: bool) -> bool {
        // Unrelaxed successors (e.g. over an infinite weight) stay out of the fringe.
        !marked && self.paths.is_reached(to)
    }
}
