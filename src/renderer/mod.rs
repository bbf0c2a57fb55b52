//! WebGPU rendering module
//!
//! Feeds particle state to an instanced pipeline: one shared circle mesh,
//! one model matrix and color per particle.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{ARENA_MESH, RenderState, Viewport, build_instances, square_viewport};
pub use vertex::{CircleInstance, MeshVertex, health_color};
