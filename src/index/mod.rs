//! Index structures backing the topology store.

pub mod vertex_slots;

pub use vertex_slots::VertexSlots;
