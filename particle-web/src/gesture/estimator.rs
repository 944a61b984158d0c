//! Gesture estimator capability and strategy selection

use serde::{Deserialize, Serialize};

use super::continuous::ContinuousEstimator;
use super::landmarks::HandSample;
use super::state::GestureState;
use super::threshold::ThresholdEstimator;

/// Turns per-frame hand samples into a [`GestureState`].
/// `None` means no hand was found in the frame.
pub trait GestureEstimator: Send {
    fn estimate(&mut self, sample: Option<&HandSample>) -> GestureState;

    /// Most recent output without consuming a frame
    fn state(&self) -> GestureState;

    /// 0-1; strategies that do not smooth may ignore it
    fn set_sensitivity(&mut self, sensitivity: f32);

    fn mode(&self) -> GestureMode;
}

/// Available estimator strategies
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GestureMode {
    /// Smoothed power-curve openness (primary)
    #[default]
    Continuous,
    /// 3-of-5 extended fingers, open or closed
    Threshold,
}

impl GestureMode {
    pub fn name(&self) -> &'static str {
        match self {
            GestureMode::Continuous => "continuous",
            GestureMode::Threshold => "threshold",
        }
    }
}

/// Build a strategy that continues from `previous`
pub fn create_estimator(
    mode: GestureMode,
    sensitivity: f32,
    previous: GestureState,
) -> Box<dyn GestureEstimator> {
    match mode {
        GestureMode::Continuous => Box::new(ContinuousEstimator::resume(previous, sensitivity)),
        GestureMode::Threshold => Box::new(ThresholdEstimator::resume(previous)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_builds_requested_mode() {
        for mode in [GestureMode::Continuous, GestureMode::Threshold] {
            let estimator = create_estimator(mode, 1.0, GestureState::NEUTRAL);
            assert_eq!(estimator.mode(), mode);
            assert_eq!(estimator.state(), GestureState::NEUTRAL);
        }
    }

    #[test]
    fn factory_carries_previous_state() {
        let previous = GestureState { openness: 0.9, position: (0.2, 0.3), ..GestureState::NEUTRAL };
        let estimator = create_estimator(GestureMode::Continuous, 1.0, previous);
        assert_eq!(estimator.state().openness, 0.9);
        assert_eq!(estimator.state().position, (0.2, 0.3));
    }
}
