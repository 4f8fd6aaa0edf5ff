//! GPU rendering subsystem.
//!
//! Renderers consume a per-frame [`Mesh`](crate::mesh::Mesh) and issue GPU
//! commands via wgpu. Each renderer owns its GPU resources (pipelines, buffers).
//!
//! Convention:
//! - Mesh positions are already in clip space; no viewport transform on the GPU.
//! - Colors are straight-alpha RGBA per vertex.

mod ctx;
pub mod mesh;

pub use ctx::{clear_color, RenderCtx, RenderTarget};
pub use mesh::MeshRenderer;
