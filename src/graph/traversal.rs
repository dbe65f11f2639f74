//! Generalized fringe-driven traversal.
//!
//! At any moment there is a collection of vertices waiting to be traversed,
//! the fringe. A traversal repeatedly takes a vertex from the fringe; an
//! unmarked vertex is marked and visited, then re-offered (so it can be
//! post-visited later) together with its unmarked successors. A vertex that
//! comes back out of the fringe after its visit is post-visited, at most once,
//! if the visitor asks for it.
//!
//! The fringe decides the search: FIFO gives BFS, LIFO gives DFS (with
//! post-visits landing in post-order), and [`PriorityFringe`] gives
//! Dijkstra/A*. The loop itself never changes.
//!
//! [`PriorityFringe`]: super::fringe::PriorityFringe

use serde::Serialize;

use crate::types::{GraphResult, Orientation, VertexId};

use super::fringe::Fringe;
use super::Graph;

/// What a visitor wants the traversal to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// End the traversal now, leaving fringe and marks as they are.
    Stop,
}

/// How a call to `traverse` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// The fringe ran dry.
    Exhausted,
    /// A visitor returned `Flow::Stop` while handling this vertex.
    Stopped(VertexId),
}

/// Where a vertex is in the current traversal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitState {
    /// Not reached yet.
    #[default]
    Unmarked,
    /// Marked, visit in progress.
    Marked,
    /// Visited; successors have been offered to the fringe.
    Visited,
    /// Post-visit done.
    PostVisited,
}

/// Per-session mark table, indexed by vertex id.
#[derive(Debug, Clone, Default)]
struct Marks {
    states: Vec<VisitState>,
}

impl Marks {
    fn get(&self, v: VertexId) -> VisitState {
        self.states.get(v as usize).copied().unwrap_or_default()
    }

    fn set(&mut self, v: VertexId, state: VisitState) {
        let idx = v as usize;
        if idx >= self.states.len() {
            self.states.resize(idx + 1, VisitState::Unmarked);
        }
        self.states[idx] = state;
    }

    fn clear(&mut self) {
        self.states.clear();
    }

    fn count(&self) -> usize {
        self.states
            .iter()
            .filter(|&&s| s != VisitState::Unmarked)
            .count()
    }
}

/// What a visitor can see and touch while it handles a vertex.
pub struct Context<'a, O: Orientation, F> {
    graph: &'a Graph<O>,
    fringe: &'a mut F,
    marks: &'a mut Marks,
}

impl<'a, O: Orientation, F: Fringe> Context<'a, O, F> {
    /// The graph being traversed.
    pub fn graph(&self) -> &'a Graph<O> {
        self.graph
    }

    /// The fringe, for visitors that re-queue vertices themselves.
    pub fn fringe(&mut self) -> &mut F {
        self.fringe
    }

    /// True if `v` has been marked in this session.
    pub fn is_marked(&self, v: VertexId) -> bool {
        self.marks.get(v) != VisitState::Unmarked
    }

    /// Current state of `v`.
    pub fn state(&self, v: VertexId) -> VisitState {
        self.marks.get(v)
    }

    /// Return a visited vertex to `Unmarked` so the next time it leaves the
    /// fringe it is visited again.
    pub fn reopen(&mut self, v: VertexId) {
        self.marks.set(v, VisitState::Unmarked);
    }
}

/// Client hooks for a traversal. Only `visit` is required.
pub trait Visitor<O: Orientation, F: Fringe> {
    /// Visit `v`. Returning `Flow::Stop` ends the traversal immediately.
    fn visit(&mut self, cx: &mut Context<'_, O, F>, v: VertexId) -> Flow;

    /// True if `v` should be post-visited once its successors are done.
    fn should_post_visit(&self, _v: VertexId) -> bool {
        false
    }

    /// Revisit `v` after traversing its successors.
    fn post_visit(&mut self, _cx: &mut Context<'_, O, F>, _v: VertexId) -> Flow {
        Flow::Continue
    }

    /// True if the successors of `v` should be offered in reverse order.
    fn reverse_successors(&self, _v: VertexId) -> bool {
        false
    }

    /// Decide whether successor `to` of `from` goes onto the fringe.
    fn process_successor(&mut self, _from: VertexId, _to: VertexId, marked: bool) -> bool {
        !marked
    }
}

/// Visitor built from a closure; see [`from_fn`].
pub struct FnVisitor<C>(C);

/// Turn a closure into a visitor that only implements `visit`.
pub fn from_fn<C>(visit: C) -> FnVisitor<C>
where
    C: FnMut(VertexId) -> Flow,
{
    FnVisitor(visit)
}

impl<O, F, C> Visitor<O, F> for FnVisitor<C>
where
    O: Orientation,
    F: Fringe,
    C: FnMut(VertexId) -> Flow,
{
    fn visit(&mut self, _cx: &mut Context<'_, O, F>, v: VertexId) -> Flow {
        (self.0)(v)
    }
}

/// One traversal session over a graph.
///
/// Marks survive across calls to `traverse`, so a stopped walk can be resumed
/// and a second call will not revisit what the first one reached. `clear`
/// forgets the marks; `reset` also empties the fringe.
pub struct Traversal<'g, O: Orientation, F: Fringe> {
    graph: &'g Graph<O>,
    fringe: F,
    marks: Marks,
}

impl<'g, O: Orientation, F: Fringe> Traversal<'g, O, F> {
    /// A traversal of `graph` that uses `fringe` as its fringe.
    pub fn new(graph: &'g Graph<O>, fringe: F) -> Self {
        Self {
            graph,
            fringe,
            marks: Marks::default(),
        }
    }

    /// The graph being traversed.
    pub fn graph(&self) -> &'g Graph<O> {
        self.graph
    }

    /// The fringe.
    pub fn fringe(&self) -> &F {
        &self.fringe
    }

    /// The fringe, mutably.
    pub fn fringe_mut(&mut self) -> &mut F {
        &mut self.fringe
    }

    /// True if `v` has been marked in this session.
    pub fn is_marked(&self, v: VertexId) -> bool {
        self.marks.get(v) != VisitState::Unmarked
    }

    /// Current state of `v`.
    pub fn state(&self, v: VertexId) -> VisitState {
        self.marks.get(v)
    }

    /// Number of vertices marked in this session.
    pub fn marked_count(&self) -> usize {
        self.marks.count()
    }

    /// Unmark every vertex.
    pub fn clear(&mut self) {
        self.marks.clear();
    }

    /// Unmark every vertex and empty the fringe.
    pub fn reset(&mut self) {
        self.marks.clear();
        self.fringe.clear();
    }

    /// Traverse starting from a single vertex.
    pub fn traverse_from<V>(&mut self, start: VertexId, visitor: &mut V) -> GraphResult<Outcome>
    where
        V: Visitor<O, F>,
    {
        self.traverse([start], visitor)
    }

    /// Add `starts` to the fringe and run until it is empty or a visitor stops.
    ///
    /// Every start is checked before any is queued, so an invalid start
    /// leaves the session untouched.
    pub fn traverse<I, V>(&mut self, starts: I, visitor: &mut V) -> GraphResult<Outcome>
    where
        I: IntoIterator<Item = VertexId>,
        V: Visitor<O, F>,
    {
        let starts: Vec<VertexId> = starts.into_iter().collect();
        for &start in &starts {
            self.graph.check_vertex(start)?;
        }
        for start in starts {
            self.fringe.push(start);
        }

        let graph = self.graph;
        while let Some(v) = self.fringe.pop() {
            if !graph.contains(v) {
                continue;
            }

            match self.marks.get(v) {
                VisitState::Unmarked => {
                    self.marks.set(v, VisitState::Marked);
                    let flow = visitor.visit(&mut self.context(), v);
                    // A visitor may have reopened v itself; only advance a mark.
                    if self.marks.get(v) == VisitState::Marked {
                        self.marks.set(v, VisitState::Visited);
                    }
                    if flow == Flow::Stop {
                        log::debug!("traversal stopped at vertex {} during visit", v);
                        return Ok(Outcome::Stopped(v));
                    }

                    self.fringe.push(v);
                    if visitor.reverse_successors(v) {
                        self.offer_successors(v, graph.successors(v).rev(), visitor);
                    } else {
                        self.offer_successors(v, graph.successors(v), visitor);
                    }
                }
                VisitState::Visited if visitor.should_post_visit(v) => {
                    self.marks.set(v, VisitState::PostVisited);
                    if visitor.post_visit(&mut self.context(), v) == Flow::Stop {
                        log::debug!("traversal stopped at vertex {} during post-visit", v);
                        return Ok(Outcome::Stopped(v));
                    }
                }
                _ => {}
            }
        }

        log::trace!("traversal exhausted; {} vertices marked", self.marked_count());
        Ok(Outcome::Exhausted)
    }

    fn offer_successors<I, V>(&mut self, from: VertexId, successors: I, visitor: &mut V)
    where
        I: Iterator<Item = VertexId>,
        V: Visitor<O, F>,
    {
        for to in successors {
            let marked = self.marks.get(to) != VisitState::Unmarked;
            if visitor.process_successor(from, to, marked) {
                self.fringe.push(to);
            }
        }
    }

    fn context(&mut self) -> Context<'_, O, F> {
        Context {
            graph: self.graph,
            fringe: &mut self.fringe,
            marks: &mut self.marks,
        }
    }
}
