//! NoHand / HandTracked state machine with edge-triggered events

use super::state::HandEvent;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PresenceTracker {
    tracked: bool,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's detection flag; returns an event only on a transition
    pub fn update(&mut self, detected: bool) -> Option<HandEvent> {
        let event = match (self.tracked, detected) {
            (false, true) => Some(HandEvent::HandDetected),
            (true, false) => Some(HandEvent::HandLost),
            _ => None,
        };
        self.tracked = detected;
        event
    }

    pub fn is_tracked(&self) -> bool {
        self.tracked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_transition() {
        let mut tracker = PresenceTracker::new();
        let events: Vec<_> = [false, false, true, true, false]
            .into_iter()
            .map(|detected| tracker.update(detected))
            .collect();
        assert_eq!(
            events,
            vec![None, None, Some(HandEvent::HandDetected), None, Some(HandEvent::HandLost)]
        );
    }

    #[test]
    fn events_alternate() {
        let mut tracker = PresenceTracker::new();
        let flags = [true, false, false, true, true, true, false, true];
        let fired: Vec<_> = flags.into_iter().filter_map(|d| tracker.update(d)).collect();
        for pair in fired.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        assert_eq!(fired.len(), 5);
        assert!(tracker.is_tracked());
    }
}
