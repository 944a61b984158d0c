//! Error taxonomy
//!
//! Nothing here is retried. Config errors reject a single command, a
//! detector error ends gesture input for the session, GPU errors fail `init`.

use thiserror::Error;

/// Rejected settings or control command
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("particle count must be greater than zero")]
    ZeroParticleCount,
    #[error("animation speed must be a positive number, got {0}")]
    InvalidAnimationSpeed(f32),
    #[error("gesture sensitivity must be a finite number, got {0}")]
    InvalidSensitivity(f32),
    #[error("pattern radius must be a positive number, got {0}")]
    InvalidRadius(f32),
    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),
    #[error("malformed command: {0}")]
    MalformedCommand(String),
    #[error("rendering has stopped; command dropped")]
    RenderingStopped,
}

/// The hand-landmark detector could not be started
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectorError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("hand landmark model failed to load: {0}")]
    ModelLoadFailed(String),
    #[error("hand detector unavailable: {0}")]
    Other(String),
}

impl DetectorError {
    /// Classify a free-form error message reported by the page
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        if lower.contains("permission") || lower.contains("notallowed") {
            DetectorError::PermissionDenied
        } else if lower.contains("model") || lower.contains("wasm") || lower.contains("load") {
            DetectorError::ModelLoadFailed(message.to_string())
        } else {
            DetectorError::Other(message.to_string())
        }
    }
}

/// Errors that can occur during GPU initialization
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GpuError {
    #[error("no window found")]
    NoWindow,
    #[error("no document found")]
    NoDocument,
    #[error("no canvas with id '{0}' found")]
    NoCanvas(String),
    #[error("surface creation failed: {0}")]
    SurfaceCreationFailed(String),
    #[error("failed to find a suitable GPU adapter")]
    NoAdapter,
    #[error("device creation failed: {0}")]
    DeviceCreationFailed(String),
}
