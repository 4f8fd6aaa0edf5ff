//! Per-frame triangle mesh.
//!
//! A [`Mesh`] is the flat geometry buffer handed to the renderer once per frame:
//! clip-space positions, one RGBA color per vertex, and a triangle-list index
//! stream. [`MeshBuilder`] is the only writer; it converts world positions to
//! clip space and offers fan/quad triangulation helpers.
//!
//! Invariants kept by the builder:
//! - `colors.len() == positions.len()`
//! - every index refers to an already-emitted vertex
//! - `indices.len()` is a multiple of 3

mod buffer;
mod builder;

pub use buffer::Mesh;
pub use builder::{world_to_clip, MeshBuilder};
