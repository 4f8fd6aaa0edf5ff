//! Umbra engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the swarm layer: window and
//! event loop, wgpu device/surface, pointer input, fixed-step frame clock,
//! the per-frame triangle mesh and the renderer that draws it.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod mesh;
pub mod render;
