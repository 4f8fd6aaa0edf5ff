//! Coordinate and geometry types shared by the mesh builder and the swarm.
//!
//! World space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! The mesh builder converts world positions to clip space on the CPU, so the
//! renderer receives ready-to-draw `[-1, 1]` coordinates.

mod color;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use vec2::Vec2;
pub use viewport::Viewport;
