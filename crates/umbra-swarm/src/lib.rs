//! Polygon swarm with projected shadows.
//!
//! A population of regular polygons drifts under small random kicks, flees
//! an attractor that follows the pointer, and bounces off the window edges.
//! Each polygon casts a long shadow directly away from the attractor.
//!
//! Everything up to the finished [`Mesh`](umbra_engine::mesh::Mesh) is pure
//! and runs without a GPU:
//!
//! - [`polygon`]: regular polygon factory and startup population
//! - [`physics`]: jitter, speed clamp, repulsion, boundary reflection
//! - [`shadow`]: shadow projection and quad emission
//! - [`driver`]: the per-frame cycle and the [`RenderBackend`] seam
//!
//! [`Application`] hosts a swarm in a window through `umbra-engine`.

pub mod app;
pub mod attractor;
pub mod config;
pub mod driver;
pub mod error;
pub mod physics;
pub mod polygon;
pub mod shadow;

pub use app::{Application, SwarmApp};
pub use attractor::Attractor;
pub use config::{Palette, PhysicsParams, PopulationParams, SwarmConfig};
pub use driver::{RenderBackend, Swarm};
pub use error::{ConfigError, ShapeError, SwarmError};
pub use polygon::{populate, Polygon};
