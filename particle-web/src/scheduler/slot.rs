//! Single-slot "latest value" channel for gesture states
//!
//! Writers overwrite, readers copy the whole tuple. Nothing is queued and
//! nobody waits on anybody: a reader always gets the newest complete state.

use std::sync::{Arc, Mutex, PoisonError};

use crate::gesture::GestureState;

#[derive(Clone, Copy, Debug, Default)]
struct Slot {
    state: GestureState,
    /// Bumped on every publish; 0 = nothing published yet
    version: u64,
}

/// Cloneable handle; all clones share one slot
#[derive(Clone, Debug, Default)]
pub struct GestureSlot {
    inner: Arc<Mutex<Slot>>,
}

impl GestureSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is in the slot
    pub fn publish(&self, state: GestureState) {
        let mut slot = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        slot.state = state;
        slot.version += 1;
    }

    /// Newest state and its version
    pub fn latest(&self) -> (GestureState, u64) {
        let slot = *self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        (slot.state, slot.version)
    }

    pub fn read(&self) -> GestureState {
        self.latest().0
    }

    pub fn version(&self) -> u64 {
        self.latest().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn state(n: f32) -> GestureState {
        GestureState { openness: n, position: (n, n), detected: true, confidence: n }
    }

    #[test]
    fn starts_neutral_and_unpublished() {
        let slot = GestureSlot::new();
        assert_eq!(slot.latest(), (GestureState::NEUTRAL, 0));
    }

    #[test]
    fn newer_writes_overwrite_older() {
        let slot = GestureSlot::new();
        let writer = slot.clone();
        writer.publish(state(0.1));
        writer.publish(state(0.2));
        writer.publish(state(0.3));
        assert_eq!(slot.latest(), (state(0.3), 3));
    }

    #[test]
    fn readers_never_see_a_torn_tuple() {
        let slot = GestureSlot::new();
        slot.publish(state(0.0));
        let writer = slot.clone();

        let handle = thread::spawn(move || {
            for i in 0..10_000 {
                writer.publish(state(i as f32 / 10_000.0));
            }
        });

        for _ in 0..10_000 {
            let s = slot.read();
            assert_eq!(s.position.0, s.openness);
            assert_eq!(s.position.1, s.openness);
            assert_eq!(s.confidence, s.openness);
        }
        handle.join().unwrap();
        assert_eq!(slot.version(), 10_001);
    }
}
