//! Gesture state - the tuple handed from the estimator to the engine

/// Openness the signal relaxes to when no hand is seen
pub const NEUTRAL_OPENNESS: f32 = 0.5;
/// Image center
pub const NEUTRAL_POSITION: (f32, f32) = (0.5, 0.5);

/// Smoothed hand signal for one estimation tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureState {
    /// 0 = fist, 1 = fully open
    pub openness: f32,
    /// Palm center in normalized image coordinates (y grows downward)
    pub position: (f32, f32),
    pub detected: bool,
    pub confidence: f32,
}

impl GestureState {
    pub const NEUTRAL: GestureState = GestureState {
        openness: NEUTRAL_OPENNESS,
        position: NEUTRAL_POSITION,
        detected: false,
        confidence: 0.0,
    };

    pub fn status(&self) -> HandStatus {
        HandStatus::classify(self)
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Edge-triggered presence notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandEvent {
    HandDetected,
    HandLost,
}

impl HandEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HandEvent::HandDetected => "HandDetected",
            HandEvent::HandLost => "HandLost",
        }
    }
}

/// Display-only classification of the continuous signal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandStatus {
    Searching,
    ClosedFist,
    PartiallyClosed,
    PartiallyOpen,
    OpenHand,
}

impl HandStatus {
    pub fn classify(state: &GestureState) -> Self {
        if !state.detected {
            HandStatus::Searching
        } else if state.openness < 0.3 {
            HandStatus::ClosedFist
        } else if state.openness < 0.5 {
            HandStatus::PartiallyClosed
        } else if state.openness < 0.7 {
            HandStatus::PartiallyOpen
        } else {
            HandStatus::OpenHand
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HandStatus::Searching => "Searching",
            HandStatus::ClosedFist => "Closed Fist",
            HandStatus::PartiallyClosed => "Partially Closed",
            HandStatus::PartiallyOpen => "Partially Open",
            HandStatus::OpenHand => "Open Hand",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracked(openness: f32) -> GestureState {
        GestureState { openness, detected: true, confidence: 0.9, ..GestureState::NEUTRAL }
    }

    #[test]
    fn classification_follows_thresholds() {
        assert_eq!(tracked(0.0).status(), HandStatus::ClosedFist);
        assert_eq!(tracked(0.29).status(), HandStatus::ClosedFist);
        assert_eq!(tracked(0.3).status(), HandStatus::PartiallyClosed);
        assert_eq!(tracked(0.5).status(), HandStatus::PartiallyOpen);
        assert_eq!(tracked(0.7).status(), HandStatus::OpenHand);
        assert_eq!(tracked(1.0).status().label(), "Open Hand");
    }

    #[test]
    fn undetected_is_searching_regardless_of_openness() {
        let state = GestureState { openness: 1.0, ..GestureState::NEUTRAL };
        assert_eq!(state.status(), HandStatus::Searching);
        assert_eq!(GestureState::default().status().label(), "Searching");
    }
}
