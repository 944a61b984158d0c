//! Continuous openness estimator (primary strategy)
//!
//! Per finger: tip-to-knuckle distance over 1.5x knuckle-to-wrist distance,
//! capped at 1. The five scores are averaged and bent by a 0.8 power curve,
//! then openness and palm position are exponentially smoothed. Without a
//! hand both drift slowly back to neutral instead of snapping.

use super::estimator::{GestureEstimator, GestureMode};
use super::landmarks::{distance_2d, palm_center, HandLandmark, HandSample, FINGERS, LANDMARK_COUNT, WRIST};
use super::state::{GestureState, NEUTRAL_OPENNESS, NEUTRAL_POSITION};

/// Weight kept from the previous value at full sensitivity
pub const DEFAULT_SMOOTHING: f32 = 0.3;
/// Weight kept from the previous value at zero sensitivity
pub const MAX_SMOOTHING: f32 = 0.5;
/// Per-frame pull toward neutral while no hand is seen
pub const RELAX_FACTOR: f32 = 0.05;

const REACH_FACTOR: f32 = 1.5;
const OPENNESS_GAMMA: f32 = 0.8;

// ============================================================================
// HAND GEOMETRY
// ============================================================================

/// Extension score of one finger, 0 (curled) to 1 (straight)
pub fn finger_extension(landmarks: &[HandLandmark; LANDMARK_COUNT], tip: usize, knuckle: usize) -> f32 {
    let reach = distance_2d(landmarks[knuckle], landmarks[WRIST]) * REACH_FACTOR;
    if reach <= f32::EPSILON {
        return 0.0;
    }
    (distance_2d(landmarks[tip], landmarks[knuckle]) / reach).min(1.0)
}

/// Unsmoothed openness of one hand
pub fn raw_openness(landmarks: &[HandLandmark; LANDMARK_COUNT]) -> f32 {
    let total: f32 = FINGERS
        .iter()
        .map(|&(tip, knuckle)| finger_extension(landmarks, tip, knuckle))
        .sum();
    let mean = total / FINGERS.len() as f32;
    mean.powf(OPENNESS_GAMMA).clamp(0.0, 1.0)
}

/// Lower sensitivity keeps more of the previous value
pub fn smoothing_for_sensitivity(sensitivity: f32) -> f32 {
    let sensitivity = if sensitivity.is_finite() { sensitivity.clamp(0.0, 1.0) } else { 1.0 };
    DEFAULT_SMOOTHING + (1.0 - sensitivity) * (MAX_SMOOTHING - DEFAULT_SMOOTHING)
}

// ============================================================================
// ESTIMATOR
// ============================================================================

pub struct ContinuousEstimator {
    state: GestureState,
    smoothing: f32,
}

impl ContinuousEstimator {
    pub fn new(sensitivity: f32) -> Self {
        Self::resume(GestureState::NEUTRAL, sensitivity)
    }

    pub fn resume(previous: GestureState, sensitivity: f32) -> Self {
        Self {
            state: previous,
            smoothing: smoothing_for_sensitivity(sensitivity),
        }
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    fn track(&mut self, sample: &HandSample) {
        let k = self.smoothing;
        let blend = |previous: f32, raw: f32| (previous * k + raw * (1.0 - k)).clamp(0.0, 1.0);

        let openness = raw_openness(&sample.landmarks);
        let (x, y) = palm_center(&sample.landmarks);

        self.state = GestureState {
            openness: blend(self.state.openness, openness),
            position: (
                blend(self.state.position.0, x),
                blend(self.state.position.1, y),
            ),
            detected: true,
            confidence: sample.confidence,
        };
    }

    fn relax(&mut self) {
        let toward = |value: f32, neutral: f32| value + (neutral - value) * RELAX_FACTOR;

        self.state = GestureState {
            openness: toward(self.state.openness, NEUTRAL_OPENNESS),
            position: (
                toward(self.state.position.0, NEUTRAL_POSITION.0),
                toward(self.state.position.1, NEUTRAL_POSITION.1),
            ),
            detected: false,
            confidence: 0.0,
        };
    }
}

impl Default for ContinuousEstimator {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl GestureEstimator for ContinuousEstimator {
    fn estimate(&mut self, sample: Option<&HandSample>) -> GestureState {
        match sample {
            Some(sample) => self.track(sample),
            None => self.relax(),
        }
        self.state
    }

    fn state(&self) -> GestureState {
        self.state
    }

    fn set_sensitivity(&mut self, sensitivity: f32) {
        self.smoothing = smoothing_for_sensitivity(sensitivity);
    }

    fn mode(&self) -> GestureMode {
        GestureMode::Continuous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::landmarks::{INDEX_MCP, INDEX_TIP, PINKY_MCP};

    /// Upright hand, wrist at the bottom; `curl` 0 = straight fingers, 1 = fist
    fn hand(center_x: f32, curl: f32) -> HandSample {
        let mut landmarks = [HandLandmark::new(center_x, 0.8, 0.0); LANDMARK_COUNT];
        for (n, &(tip, knuckle)) in FINGERS.iter().enumerate() {
            let kx = center_x + (n as f32 - 2.0) * 0.03;
            let ky = 0.65;
            landmarks[knuckle] = HandLandmark::new(kx, ky, 0.0);
            // knuckle-to-wrist is ~0.15, so a straight finger reaches 0.225
            let length = 0.25 * (1.0 - curl) + 0.01 * curl;
            landmarks[tip] = HandLandmark::new(kx, ky - length, 0.0);
        }
        HandSample::new(landmarks, 0.95)
    }

    #[test]
    fn straight_finger_clamps_to_one() {
        let mut landmarks = [HandLandmark::default(); LANDMARK_COUNT];
        landmarks[WRIST] = HandLandmark::new(0.5, 0.9, 0.0);
        landmarks[INDEX_MCP] = HandLandmark::new(0.5, 0.7, 0.0);
        let reach = distance_2d(landmarks[INDEX_MCP], landmarks[WRIST]) * 1.5;

        landmarks[INDEX_TIP] = HandLandmark::new(0.5, 0.7 - reach, 0.0);
        let exact = finger_extension(&landmarks, INDEX_TIP, INDEX_MCP);
        assert!((exact - 1.0).abs() < 1e-5 && exact <= 1.0);

        for stretch in [1.01, 2.0, 5.0] {
            landmarks[INDEX_TIP] = HandLandmark::new(0.5, 0.7 - reach * stretch, 0.0);
            assert_eq!(finger_extension(&landmarks, INDEX_TIP, INDEX_MCP), 1.0);
        }
    }

    #[test]
    fn extension_is_scale_invariant() {
        let small = hand(0.5, 0.5);
        let mut large = small.clone();
        for lm in large.landmarks.iter_mut() {
            lm.x = 0.5 + (lm.x - 0.5) * 2.0;
            lm.y = 0.5 + (lm.y - 0.5) * 2.0;
        }
        let a = raw_openness(&small.landmarks);
        let b = raw_openness(&large.landmarks);
        assert!((a - b).abs() < 1e-4);
    }

    #[test]
    fn collapsed_knuckle_scores_zero() {
        let landmarks = [HandLandmark::new(0.4, 0.4, 0.0); LANDMARK_COUNT];
        assert_eq!(finger_extension(&landmarks, INDEX_TIP, PINKY_MCP), 0.0);
        assert_eq!(raw_openness(&landmarks), 0.0);
    }

    #[test]
    fn open_hand_reads_open_and_fist_reads_closed() {
        assert_eq!(raw_openness(&hand(0.5, 0.0).landmarks), 1.0);
        assert!(raw_openness(&hand(0.5, 1.0).landmarks) < 0.1);
        let half = raw_openness(&hand(0.5, 0.5).landmarks);
        assert!(half > 0.4 && half < 0.9);
    }

    #[test]
    fn gamma_curve_lifts_mid_range() {
        let mean = 0.5f32;
        assert!(mean.powf(OPENNESS_GAMMA) > mean);
    }

    #[test]
    fn tracking_blends_with_previous_state() {
        let mut estimator = ContinuousEstimator::new(1.0);
        let state = estimator.estimate(Some(&hand(0.5, 0.0)));
        let expected = NEUTRAL_OPENNESS * DEFAULT_SMOOTHING + 1.0 * (1.0 - DEFAULT_SMOOTHING);
        assert!((state.openness - expected).abs() < 1e-6);
        assert!(state.detected);
        assert_eq!(state.confidence, 0.95);

        for _ in 0..30 {
            estimator.estimate(Some(&hand(0.5, 0.0)));
        }
        assert!((estimator.state().openness - 1.0).abs() < 1e-4);
    }

    #[test]
    fn palm_position_is_smoothed_toward_palm_center() {
        let mut estimator = ContinuousEstimator::new(1.0);
        let sample = hand(0.2, 0.0);
        let (px, py) = palm_center(&sample.landmarks);
        for _ in 0..40 {
            estimator.estimate(Some(&sample));
        }
        let (x, y) = estimator.state().position;
        assert!((x - px).abs() < 1e-4);
        assert!((y - py).abs() < 1e-4);
    }

    #[test]
    fn lower_sensitivity_smooths_more() {
        assert_eq!(smoothing_for_sensitivity(1.0), DEFAULT_SMOOTHING);
        assert_eq!(smoothing_for_sensitivity(0.0), MAX_SMOOTHING);
        assert_eq!(smoothing_for_sensitivity(-4.0), MAX_SMOOTHING);

        let mut fast = ContinuousEstimator::new(1.0);
        let mut slow = ContinuousEstimator::new(0.0);
        let a = fast.estimate(Some(&hand(0.5, 0.0))).openness;
        let b = slow.estimate(Some(&hand(0.5, 0.0))).openness;
        assert!(a > b);
    }

    #[test]
    fn relaxes_monotonically_to_neutral_without_overshoot() {
        let start = GestureState {
            openness: 1.0,
            position: (0.9, 0.1),
            detected: true,
            confidence: 1.0,
        };
        let mut estimator = ContinuousEstimator::resume(start, 1.0);
        let mut previous = start;
        for _ in 0..300 {
            let state = estimator.estimate(None);
            assert!(!state.detected);
            assert!(state.openness <= previous.openness && state.openness >= NEUTRAL_OPENNESS);
            assert!(state.position.0 <= previous.position.0 && state.position.0 >= 0.5);
            assert!(state.position.1 >= previous.position.1 && state.position.1 <= 0.5);
            previous = state;
        }
        assert!((previous.openness - 0.5).abs() < 1e-3);
        assert!((previous.position.0 - 0.5).abs() < 1e-3);
        assert!((previous.position.1 - 0.5).abs() < 1e-3);
    }

    #[test]
    fn one_missed_frame_barely_moves_the_signal() {
        let mut estimator = ContinuousEstimator::new(1.0);
        for _ in 0..30 {
            estimator.estimate(Some(&hand(0.5, 0.0)));
        }
        let before = estimator.state().openness;
        let after = estimator.estimate(None).openness;
        assert!(before - after < 0.03);
    }
}
