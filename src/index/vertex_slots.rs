//! Vertex identity arena: slot table plus a lowest-first free list.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::types::{VertexId, FIRST_ID, MAX_VERTEX_ID};

/// Slot table indexed by vertex id.
///
/// `live[id]` says whether `id` is allocated. Slot 0 is never used. The table
/// is trimmed so its last slot is always live (or only slot 0 remains), which
/// makes `max()` the table length minus one.
///
/// Freed ids below the maximum go onto a min-heap so the lowest free id is
/// reused first. Ids freed at the top are dropped from the table instead;
/// heap entries left above a shrunk table are stale and are discarded the
/// next time `allocate` reaches them.
#[derive(Debug, Clone)]
pub struct VertexSlots {
    live: Vec<bool>,
    free: BinaryHeap<Reverse<VertexId>>,
    count: usize,
}

impl VertexSlots {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty arena with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut live = Vec::with_capacity(capacity + 1);
        live.push(false);
        Self {
            live,
            free: BinaryHeap::new(),
            count: 0,
        }
    }

    /// Rebuild an arena holding exactly the given ids.
    ///
    /// Returns the first id that is zero, repeated or above `MAX_VERTEX_ID`, if any.
    pub fn from_ids<I>(ids: I) -> Result<Self, VertexId>
    where
        I: IntoIterator<Item = VertexId>,
    {
        let mut slots = Self::new();
        for id in ids {
            if !(FIRST_ID..=MAX_VERTEX_ID).contains(&id) {
                return Err(id);
            }
            let idx = usize::try_from(id).map_err(|_| id)?;
            let needed = idx.checked_add(1).ok_or(id)?;
            if needed > slots.live.len() {
                slots.live.resize(needed, false);
            }
            if slots.live[idx] {
                return Err(id);
            }
            slots.live[idx] = true;
            slots.count += 1;
        }
        slots.free = (1..slots.live.len())
            .filter(|&idx| !slots.live[idx])
            .map(|idx| Reverse(idx as VertexId))
            .collect();
        Ok(slots)
    }

    /// Hand out the lowest free id, extending the table when none is free.
    pub fn allocate(&mut self) -> VertexId {
        while let Some(Reverse(id)) = self.free.pop() {
            if (id as usize) < self.live.len() {
                self.live[id as usize] = true;
                self.count += 1;
                return id;
            }
            // Everything left is above the table as well.
            self.free.clear();
        }
        let id = self.live.len() as VertexId;
        self.live.push(true);
        self.count += 1;
        id
    }

    /// Free `id`. Returns false if it was not allocated.
    pub fn release(&mut self, id: VertexId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.live[id as usize] = false;
        self.count -= 1;
        if id == self.max() {
            while self.live.len() > 1 && !self.live[self.live.len() - 1] {
                self.live.pop();
            }
        } else {
            self.free.push(Reverse(id));
        }
        true
    }

    /// True if `id` is currently allocated.
    pub fn contains(&self, id: VertexId) -> bool {
        self.live.get(id as usize).copied().unwrap_or(false)
    }

    /// Number of allocated ids.
    pub fn len(&self) -> usize {
        self.count
    }

    /// True if nothing is allocated.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Greatest allocated id, or 0 when empty.
    pub fn max(&self) -> VertexId {
        (self.live.len() - 1) as VertexId
    }

    /// Length of the slot table (one past `max()`).
    pub fn table_len(&self) -> usize {
        self.live.len()
    }

    /// Allocated ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.live
            .iter()
            .enumerate()
            .skip(FIRST_ID as usize)
            .filter(|(_, &live)| live)
            .map(|(idx, _)| idx as VertexId)
    }
}

impl Default for VertexSlots {
    fn default() -> Self {
        Self::new()
    }
}
