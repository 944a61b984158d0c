//! Gesture module - hand landmarks to a smoothed openness/position signal
//!
//! Re-exports only. All logic in submodules.

mod landmarks;
mod state;
mod presence;
mod estimator;
mod continuous;
mod threshold;
mod pipeline;

pub use landmarks::{
    HandLandmark, HandSample, palm_center, distance_2d,
    LANDMARK_COUNT, FINGERS,
    WRIST, THUMB_MCP, THUMB_TIP, INDEX_MCP, INDEX_TIP, MIDDLE_MCP, MIDDLE_TIP,
    RING_MCP, RING_TIP, PINKY_MCP, PINKY_TIP,
};
pub use state::{GestureState, HandEvent, HandStatus, NEUTRAL_OPENNESS, NEUTRAL_POSITION};
pub use presence::PresenceTracker;
pub use estimator::{create_estimator, GestureEstimator, GestureMode};
pub use continuous::{
    finger_extension, raw_openness, smoothing_for_sensitivity, ContinuousEstimator,
    DEFAULT_SMOOTHING, MAX_SMOOTHING, RELAX_FACTOR,
};
pub use threshold::{count_extended_fingers, is_hand_open, ThresholdEstimator, THUMB_EXTENSION_DISTANCE};
pub use pipeline::GesturePipeline;
