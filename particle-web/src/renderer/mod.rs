//! Renderer module - instanced particle drawing
//!
//! Re-exports only. All logic in submodules.

mod camera;
mod instance;
#[cfg(target_arch = "wasm32")]
mod gpu;

pub use camera::{Camera, CameraUniform, CAMERA_DISTANCE};
pub use instance::{build_instances, ParticleInstance, QuadVertex, POINT_SIZE, QUAD_VERTICES};
#[cfg(target_arch = "wasm32")]
pub use gpu::ParticleRenderer;
