//! Particle module - per-particle state and the engine that drives it
//!
//! Re-exports only. All logic in submodules.

mod buffers;
mod color;
mod engine;

pub use buffers::ParticleBuffers;
pub use color::{gradient_color, vivid, Rgb};
pub use engine::{
    EngineParams, ParticleEngine,
    BINARY_CLOSED_SCALE, BINARY_OPEN_SCALE,
    DISPERSION_THRESHOLD, INTERPOLATION_FACTOR, MAX_SCALE, MIN_SCALE,
};
