//! Threshold estimator (reduced strategy)
//!
//! Open when at least 3 of 5 fingers are extended. The thumb counts as
//! extended when its tip is more than 0.1 (normalized image units) from its
//! knuckle; the other four when the tip is above the knuckle in the image.
//! The absolute thumb distance is not scale-invariant across camera
//! distances and is kept as-is.

use super::estimator::{GestureEstimator, GestureMode};
use super::landmarks::{distance_2d, palm_center, HandLandmark, HandSample, FINGERS, LANDMARK_COUNT};
use super::state::GestureState;

pub const THUMB_EXTENSION_DISTANCE: f32 = 0.1;
const OPEN_FINGER_COUNT: usize = 3;

pub fn count_extended_fingers(landmarks: &[HandLandmark; LANDMARK_COUNT]) -> usize {
    let (thumb_tip, thumb_knuckle) = FINGERS[0];
    let thumb = distance_2d(landmarks[thumb_tip], landmarks[thumb_knuckle]) > THUMB_EXTENSION_DISTANCE;

    let others = FINGERS[1..]
        .iter()
        .filter(|&&(tip, knuckle)| landmarks[tip].y < landmarks[knuckle].y)
        .count();

    usize::from(thumb) + others
}

pub fn is_hand_open(landmarks: &[HandLandmark; LANDMARK_COUNT]) -> bool {
    count_extended_fingers(landmarks) >= OPEN_FINGER_COUNT
}

/// Reports openness as exactly 1.0 (open) or 0.0 (closed)
pub struct ThresholdEstimator {
    state: GestureState,
}

impl ThresholdEstimator {
    pub fn new() -> Self {
        Self::resume(GestureState::NEUTRAL)
    }

    pub fn resume(previous: GestureState) -> Self {
        Self { state: previous }
    }
}

impl Default for ThresholdEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureEstimator for ThresholdEstimator {
    fn estimate(&mut self, sample: Option<&HandSample>) -> GestureState {
        self.state = match sample {
            Some(sample) => GestureState {
                openness: if is_hand_open(&sample.landmarks) { 1.0 } else { 0.0 },
                position: palm_center(&sample.landmarks),
                detected: true,
                confidence: sample.confidence,
            },
            // Hold the last reading; the engine eases back to neutral scale
            None => GestureState {
                detected: false,
                confidence: 0.0,
                ..self.state
            },
        };
        self.state
    }

    fn state(&self) -> GestureState {
        self.state
    }

    fn set_sensitivity(&mut self, _sensitivity: f32) {}

    fn mode(&self) -> GestureMode {
        GestureMode::Threshold
    }
}
