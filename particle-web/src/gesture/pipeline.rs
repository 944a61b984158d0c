//! Gesture pipeline - one estimation tick per processed camera frame
//!
//! Owns the active strategy and the presence state machine, publishes every
//! result into the shared [`GestureSlot`], and fans out hand events to
//! subscribers. Once the detector is reported unavailable the pipeline
//! parks the slot at neutral and ignores further samples for the session.

use std::sync::mpsc::{self, Receiver, Sender};

use super::estimator::{create_estimator, GestureEstimator, GestureMode};
use super::landmarks::HandSample;
use super::presence::PresenceTracker;
use super::state::{GestureState, HandEvent};
use crate::error::DetectorError;
use crate::scheduler::GestureSlot;

pub struct GesturePipeline {
    estimator: Box<dyn GestureEstimator>,
    presence: PresenceTracker,
    slot: GestureSlot,
    sensitivity: f32,
    detector_error: Option<DetectorError>,
    subscribers: Vec<Sender<HandEvent>>,
}

impl GesturePipeline {
    pub fn new(mode: GestureMode, sensitivity: f32, slot: GestureSlot) -> Self {
        Self {
            estimator: create_estimator(mode, sensitivity, GestureState::NEUTRAL),
            presence: PresenceTracker::new(),
            slot,
            sensitivity,
            detector_error: None,
            subscribers: Vec::new(),
        }
    }

    /// Receive every future HandDetected / HandLost
    pub fn subscribe(&mut self) -> Receiver<HandEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Run one frame. `None` (or a sample that failed to parse) is no hand.
    pub fn process_frame(&mut self, sample: Option<&HandSample>) -> Option<HandEvent> {
        if self.detector_error.is_some() {
            return None;
        }

        let state = self.estimator.estimate(sample);
        self.slot.publish(state);
        self.transition(state.detected)
    }

    /// Flat `[x, y, z, ...]` landmarks for `num_hands` hands; only the first is used
    pub fn process_flat(&mut self, data: &[f32], num_hands: usize, confidence: f32) -> Option<HandEvent> {
        let sample = if num_hands > 0 {
            HandSample::from_flat(data, confidence)
        } else {
            None
        };
        self.process_frame(sample.as_ref())
    }

    /// Camera or model failed. Returns false if a failure was already reported.
    pub fn report_detector_failure(&mut self, error: DetectorError) -> bool {
        if self.detector_error.is_some() {
            return false;
        }

        log::warn!("⚠️ gesture input disabled: {}", error);
        self.detector_error = Some(error);
        self.slot.publish(GestureState::NEUTRAL);
        self.transition(false);
        true
    }

    fn transition(&mut self, detected: bool) -> Option<HandEvent> {
        let event = self.presence.update(detected)?;
        match event {
            HandEvent::HandDetected => log::info!("🖐️ hand detected"),
            HandEvent::HandLost => log::info!("hand lost"),
        }
        self.subscribers.retain(|tx| tx.send(event).is_ok());
        Some(event)
    }

    /// Swap strategy, continuing from the current state
    pub fn set_mode(&mut self, mode: GestureMode) {
        if mode == self.estimator.mode() {
            return;
        }
        let previous = self.estimator.state();
        self.estimator = create_estimator(mode, self.sensitivity, previous);
        log::debug!("gesture mode -> {}", mode.name());
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
        self.estimator.set_sensitivity(sensitivity);
    }

    pub fn mode(&self) -> GestureMode {
        self.estimator.mode()
    }

    pub fn state(&self) -> GestureState {
        self.estimator.state()
    }

    pub fn is_tracking(&self) -> bool {
        self.presence.is_tracked()
    }

    pub fn detector_error(&self) -> Option<&DetectorError> {
        self.detector_error.as_ref()
    }

    pub fn slot(&self) -> &GestureSlot {
        &self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::landmarks::{HandLandmark, FINGERS, LANDMARK_COUNT};

    fn open_hand() -> HandSample {
        let mut landmarks = [HandLandmark::new(0.5, 0.8, 0.0); LANDMARK_COUNT];
        for (n, &(tip, knuckle)) in FINGERS.iter().enumerate() {
            let kx = 0.44 + n as f32 * 0.03;
            landmarks[knuckle] = HandLandmark::new(kx, 0.65, 0.0);
            landmarks[tip] = HandLandmark::new(kx, 0.35, 0.0);
        }
        HandSample::new(landmarks, 0.9)
    }

    fn pipeline() -> GesturePipeline {
        GesturePipeline::new(GestureMode::Continuous, 1.0, GestureSlot::new())
    }

    #[test]
    fn edge_events_fire_once_per_transition() {
        let mut p = pipeline();
        let hand = open_hand();
        let frames = [None, None, Some(&hand), Some(&hand), None];
        let events: Vec<_> = frames.into_iter().map(|f| p.process_frame(f)).collect();
        assert_eq!(
            events,
            vec![None, None, Some(HandEvent::HandDetected), None, Some(HandEvent::HandLost)]
        );
    }

    #[test]
    fn every_frame_is_published() {
        let slot = GestureSlot::new();
        let mut p = GesturePipeline::new(GestureMode::Continuous, 1.0, slot.clone());
        p.process_frame(Some(&open_hand()));
        p.process_frame(None);
        let (state, version) = slot.latest();
        assert_eq!(version, 2);
        assert_eq!(state, p.state());
        assert!(!state.detected);
    }

    #[test]
    fn subscribers_receive_events() {
        let mut p = pipeline();
        let rx = p.subscribe();
        p.process_frame(Some(&open_hand()));
        p.process_frame(Some(&open_hand()));
        p.process_frame(None);
        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(received, vec![HandEvent::HandDetected, HandEvent::HandLost]);
    }

    #[test]
    fn malformed_flat_samples_count_as_no_hand() {
        let mut p = pipeline();
        assert_eq!(p.process_flat(&[0.5; 30], 1, 0.9), None);
        assert!(!p.is_tracking());

        let flat: Vec<f32> = open_hand().landmarks.iter().flat_map(|l| [l.x, l.y, l.z]).collect();
        assert_eq!(p.process_flat(&flat, 1, 0.9), Some(HandEvent::HandDetected));
        assert_eq!(p.process_flat(&flat, 0, 0.9), Some(HandEvent::HandLost));
    }

    #[test]
    fn detector_failure_freezes_at_neutral() {
        let slot = GestureSlot::new();
        let mut p = GesturePipeline::new(GestureMode::Continuous, 1.0, slot.clone());
        let rx = p.subscribe();
        p.process_frame(Some(&open_hand()));

        assert!(p.report_detector_failure(DetectorError::PermissionDenied));
        assert!(!p.report_detector_failure(DetectorError::Other("again".into())));
        assert_eq!(p.detector_error(), Some(&DetectorError::PermissionDenied));
        assert_eq!(slot.read(), GestureState::NEUTRAL);

        let version = slot.version();
        assert_eq!(p.process_frame(Some(&open_hand())), None);
        assert_eq!(slot.version(), version);

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(received, vec![HandEvent::HandDetected, HandEvent::HandLost]);
    }

    #[test]
    fn switching_mode_keeps_presence_and_state() {
        let mut p = pipeline();
        p.process_frame(Some(&open_hand()));
        let before = p.state();

        p.set_mode(GestureMode::Threshold);
        assert_eq!(p.mode(), GestureMode::Threshold);
        assert_eq!(p.state(), before);
        // Still tracked: no second HandDetected
        assert_eq!(p.process_frame(Some(&open_hand())), None);
        assert_eq!(p.state().openness, 1.0);
    }
}
