//! Particle Web - hand-gesture driven WebGPU particle field
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - the wasm_bindgen start hook
//! - re-exports of the core API (usable natively for tests and tools)

pub mod config;
pub mod error;
pub mod gesture;
pub mod particles;
pub mod patterns;
pub mod renderer;
pub mod scheduler;

#[cfg(target_arch = "wasm32")]
mod bridge;

pub use config::{ControlCommand, VisualizerSettings, DEFAULT_PARTICLE_COUNT};
pub use error::{ConfigError, DetectorError, GpuError};
pub use gesture::{
    GestureEstimator, GestureMode, GesturePipeline, GestureState, HandEvent, HandSample, HandStatus,
};
pub use particles::{EngineParams, ParticleEngine, Rgb};
pub use patterns::PatternKind;
pub use scheduler::{FrameClock, FrameReport, FrameScheduler, FrameSink, GestureSlot, Session};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

#[cfg(target_arch = "wasm32")]
pub use bridge::*;

/// Called automatically when WASM module loads
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    bridge::init_logger(log::LevelFilter::Info);
    log::info!("✅ particle-web loaded");
}
