//! Fringe containers: the frontier that decides traversal order.
//!
//! A FIFO fringe gives breadth-first order, a LIFO fringe depth-first order,
//! and [`PriorityFringe`] the best-first order used by Dijkstra and A*.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::types::VertexId;

/// The container a traversal pulls its next vertex from.
pub trait Fringe {
    /// Offer a vertex to the fringe.
    fn push(&mut self, v: VertexId);

    /// Remove and return the next vertex, or None when empty.
    fn pop(&mut self) -> Option<VertexId>;

    /// Number of queued entries.
    fn len(&self) -> usize;

    /// True if nothing is queued.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every queued entry.
    fn clear(&mut self);
}

/// First-in first-out fringe (breadth-first search).
pub type FifoFringe = VecDeque<VertexId>;

/// Last-in first-out fringe (depth-first search).
pub type LifoFringe = Vec<VertexId>;

impl Fringe for VecDeque<VertexId> {
    fn push(&mut self, v: VertexId) {
        self.push_back(v);
    }

    fn pop(&mut self) -> Option<VertexId> {
        self.pop_front()
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn clear(&mut self) {
        VecDeque::clear(self);
    }
}

impl Fringe for Vec<VertexId> {
    fn push(&mut self, v: VertexId) {
        Vec::push(self, v);
    }

    fn pop(&mut self) -> Option<VertexId> {
        Vec::pop(self)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

/// Duplicate-free min-priority fringe with in-place decrease-key.
///
/// Entries are ordered by `(priority, vertex id)`, so equal priorities pop in
/// ascending id order. The fringe remembers the last priority assigned to
/// every vertex (`+inf` until one is set); a plain `push` queues a vertex at
/// that remembered priority.
///
/// Backed by an indexed binary heap: `position[v]` is the heap slot of `v`,
/// which lets `set_priority` and `remove` run in O(log n).
#[derive(Debug, Clone, Default)]
pub struct PriorityFringe {
    heap: Vec<VertexId>,
    position: Vec<Option<usize>>,
    priority: Vec<f64>,
}

impl PriorityFringe {
    /// Create an empty fringe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty fringe sized for vertex ids up to `max_vertex`.
    pub fn with_capacity(max_vertex: VertexId) -> Self {
        let slots = max_vertex as usize + 1;
        Self {
            heap: Vec::with_capacity(slots),
            position: vec![None; slots],
            priority: vec![f64::INFINITY; slots],
        }
    }

    /// Number of queued vertices.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// True if `v` is queued.
    pub fn contains(&self, v: VertexId) -> bool {
        self.slot(v).is_some()
    }

    /// Last priority assigned to `v`, or `+inf` if none was.
    pub fn priority(&self, v: VertexId) -> f64 {
        self.priority
            .get(v as usize)
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// Queue `v` at its remembered priority. Returns false if it was already queued.
    pub fn insert(&mut self, v: VertexId) -> bool {
        if self.contains(v) {
            return false;
        }
        self.grow(v);
        let at = self.heap.len();
        self.heap.push(v);
        self.position[v as usize] = Some(at);
        self.sift_up(at);
        true
    }

    /// Set the priority of `v` and make sure it is queued.
    pub fn insert_with(&mut self, v: VertexId, priority: f64) {
        self.set_priority(v, priority);
        self.insert(v);
    }

    /// Change the priority of `v`. If `v` is queued it moves to its new place.
    pub fn set_priority(&mut self, v: VertexId, priority: f64) {
        self.grow(v);
        let old = self.priority[v as usize];
        self.priority[v as usize] = priority;
        if let Some(at) = self.slot(v) {
            if priority.total_cmp(&old) == Ordering::Less {
                self.sift_up(at);
            } else {
                self.sift_down(at);
            }
        }
    }

    /// Take `v` out of the fringe. Returns false if it was not queued.
    pub fn remove(&mut self, v: VertexId) -> bool {
        let Some(at) = self.slot(v) else {
            return false;
        };
        self.take(at);
        true
    }

    /// Remove and return the vertex with the lowest priority.
    pub fn extract_min(&mut self) -> Option<VertexId> {
        if self.heap.is_empty() {
            return None;
        }
        Some(self.take(0))
    }

    /// The vertex `extract_min` would return, without removing it.
    pub fn peek_min(&self) -> Option<VertexId> {
        self.heap.first().copied()
    }

    /// Drop every queued vertex. Remembered priorities are kept.
    pub fn clear(&mut self) {
        for v in self.heap.drain(..) {
            self.position[v as usize] = None;
        }
    }

    /// Forget every queued vertex and every remembered priority.
    pub fn reset(&mut self) {
        self.heap.clear();
        self.position.iter_mut().for_each(|p| *p = None);
        self.priority.iter_mut().for_each(|p| *p = f64::INFINITY);
    }

    fn slot(&self, v: VertexId) -> Option<usize> {
        self.position.get(v as usize).copied().flatten()
    }

    fn grow(&mut self, v: VertexId) {
        let needed = v as usize + 1;
        if self.position.len() < needed {
            self.position.resize(needed, None);
            self.priority.resize(needed, f64::INFINITY);
        }
    }

    /// Remove the entry at heap slot `at` and return its vertex.
    fn take(&mut self, at: usize) -> VertexId {
        let last = self.heap.len() - 1;
        self.swap(at, last);
        let v = self.heap.pop().unwrap_or_default();
        self.position[v as usize] = None;
        if at < self.heap.len() {
            self.sift_down(at);
            self.sift_up(at);
        }
        v
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let (va, vb) = (self.heap[a], self.heap[b]);
        self.priority[va as usize]
            .total_cmp(&self.priority[vb as usize])
            .then(va.cmp(&vb))
            == Ordering::Less
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a] as usize] = Some(a);
        self.position[self.heap[b] as usize] = Some(b);
    }

    fn sift_up(&mut self, mut node: usize) {
        while node > 0 {
            let parent = (node - 1) / 2;
            if self.less(node, parent) {
                self.swap(node, parent);
                node = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut node: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * node + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut smaller = left;
            if right < len && self.less(right, left) {
                smaller = right;
            }
            if self.less(smaller, node) {
                self.swap(node, smaller);
                node = smaller;
            } else {
                break;
            }
        }
    }
}

impl Fringe for PriorityFringe {
    fn push(&mut self, v: VertexId) {
        self.insert(v);
    }

    fn pop(&mut self) -> Option<VertexId> {
        self.extract_min()
    }

    fn len(&self) -> usize {
        PriorityFringe::len(self)
    }

    fn clear(&mut self) {
        PriorityFringe::clear(self);
    }
}
