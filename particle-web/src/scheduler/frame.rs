//! Frame scheduler - one tick per display refresh
//!
//! Each tick runs in a fixed order: drain pending control commands, read the
//! newest gesture state from the slot, drive the engine, advance the
//! animation, hand the engine to the sink for one draw. Taking `&mut self`
//! means two ticks can never overlap.

use std::sync::mpsc::{self, Receiver, Sender};

use super::slot::GestureSlot;
use crate::config::{ControlCommand, VisualizerSettings};
use crate::gesture::{GestureMode, GestureState};
use crate::particles::ParticleEngine;

/// Openness at or above this counts as "open" for the binary response
const BINARY_OPEN_THRESHOLD: f32 = 0.5;

/// Receives the engine once per tick to draw it
pub trait FrameSink {
    fn draw(&mut self, engine: &ParticleEngine);
}

/// Headless sink: the engine still animates, nothing is drawn
impl FrameSink for () {
    fn draw(&mut self, _engine: &ParticleEngine) {}
}

/// What one tick did
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Gesture state the engine was driven with
    pub state: GestureState,
    /// False when the estimator published nothing since the previous tick
    pub fresh_sample: bool,
    pub commands_applied: usize,
    pub particle_count: usize,
    pub dt_scale: f32,
}

pub struct FrameScheduler {
    engine: ParticleEngine,
    slot: GestureSlot,
    last_version: u64,
    last_state: GestureState,
    commands: Receiver<ControlCommand>,
    command_tx: Sender<ControlCommand>,
    sensitivity: f32,
    mode: GestureMode,
    frames: u64,
    running: bool,
}

impl FrameScheduler {
    pub fn new(settings: &VisualizerSettings, slot: GestureSlot) -> Self {
        let (command_tx, commands) = mpsc::channel();
        let (last_state, last_version) = slot.latest();

        Self {
            engine: ParticleEngine::create(settings.engine_params()),
            slot,
            last_version,
            last_state,
            commands,
            command_tx,
            sensitivity: settings.gesture_sensitivity,
            mode: settings.gesture_mode,
            frames: 0,
            running: true,
        }
    }

    /// Sender for the control surface; commands land before the next draw
    pub fn command_sender(&self) -> Sender<ControlCommand> {
        self.command_tx.clone()
    }

    /// Run one frame. Returns `None` once the loop has been stopped.
    pub fn tick(&mut self, dt_scale: f32, sink: &mut dyn FrameSink) -> Option<FrameReport> {
        if !self.running {
            return None;
        }

        let commands_applied = self.drain_commands();

        let (state, version) = self.slot.latest();
        let fresh_sample = version != self.last_version;
        self.last_version = version;
        self.last_state = state;

        match self.mode {
            GestureMode::Continuous => {
                self.engine.apply_gesture(state.openness, state.position, self.sensitivity)
            }
            GestureMode::Threshold => {
                let hand_open = state.detected.then_some(state.openness >= BINARY_OPEN_THRESHOLD);
                self.engine.apply_binary_gesture(hand_open);
            }
        }

        self.engine.advance(dt_scale);
        sink.draw(&self.engine);
        self.frames += 1;

        Some(FrameReport {
            state,
            fresh_sample,
            commands_applied,
            particle_count: self.engine.count(),
            dt_scale,
        })
    }

    fn drain_commands(&mut self) -> usize {
        let pending: Vec<ControlCommand> = self.commands.try_iter().collect();
        let applied = pending.len();
        for command in pending {
            self.apply(command);
        }
        applied
    }

    fn apply(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::SetPattern { pattern } => self.engine.set_pattern(pattern),
            ControlCommand::SetParticleCount { count } => self.engine.set_count(count),
            ControlCommand::SetColors { primary, secondary } => {
                self.engine.set_colors(primary, secondary)
            }
            ControlCommand::SetAnimationSpeed { speed } => self.engine.set_animation_speed(speed),
            ControlCommand::SetGestureSensitivity { sensitivity } => self.sensitivity = sensitivity,
            ControlCommand::SetGestureMode { mode } => self.mode = mode,
        }
    }

    /// Halt the loop and free particle storage. Safe to call repeatedly.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.engine.dispose();
        log::info!("⏹️ frame loop stopped after {} frames", self.frames);
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn engine(&self) -> &ParticleEngine {
        &self.engine
    }

    /// State used by the most recent tick
    pub fn last_state(&self) -> GestureState {
        self.last_state
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::{BINARY_OPEN_SCALE, MIN_SCALE};
    use crate::patterns::PatternKind;

    #[derive(Default)]
    struct CountingSink {
        draws: usize,
        last_count: usize,
    }

    impl FrameSink for CountingSink {
        fn draw(&mut self, engine: &ParticleEngine) {
            self.draws += 1;
            self.last_count = engine.count();
        }
    }

    fn settings() -> VisualizerSettings {
        VisualizerSettings {
            particle_count: 200,
            seed: 7,
            ..VisualizerSettings::default()
        }
    }

    fn closed_hand() -> GestureState {
        GestureState {
            openness: 0.0,
            position: (0.5, 0.5),
            detected: true,
            confidence: 0.9,
        }
    }

    #[test]
    fn each_tick_draws_once() {
        let mut scheduler = FrameScheduler::new(&settings(), GestureSlot::new());
        let mut sink = CountingSink::default();
        for _ in 0..5 {
            scheduler.tick(1.0, &mut sink);
        }
        assert_eq!(sink.draws, 5);
        assert_eq!(scheduler.frames(), 5);
    }

    #[test]
    fn commands_apply_before_the_draw() {
        let mut scheduler = FrameScheduler::new(&settings(), GestureSlot::new());
        let tx = scheduler.command_sender();
        tx.send(ControlCommand::SetParticleCount { count: 50 }).unwrap();
        tx.send(ControlCommand::SetPattern { pattern: PatternKind::Torus }).unwrap();

        let mut sink = CountingSink::default();
        let report = scheduler.tick(1.0, &mut sink).unwrap();
        assert_eq!(report.commands_applied, 2);
        assert_eq!(report.particle_count, 50);
        assert_eq!(sink.last_count, 50);
        assert_eq!(scheduler.engine().pattern(), PatternKind::Torus);

        let report = scheduler.tick(1.0, &mut sink).unwrap();
        assert_eq!(report.commands_applied, 0);
    }

    #[test]
    fn stale_slot_reuses_previous_state() {
        let slot = GestureSlot::new();
        let mut scheduler = FrameScheduler::new(&settings(), slot.clone());

        slot.publish(closed_hand());
        let first = scheduler.tick(1.0, &mut ()).unwrap();
        assert!(first.fresh_sample);
        assert_eq!(first.state, closed_hand());

        let second = scheduler.tick(1.0, &mut ()).unwrap();
        assert!(!second.fresh_sample);
        assert_eq!(second.state, closed_hand());
        assert_eq!(scheduler.last_state(), closed_hand());
    }

    #[test]
    fn many_publishes_between_ticks_only_latest_is_seen() {
        let slot = GestureSlot::new();
        let mut scheduler = FrameScheduler::new(&settings(), slot.clone());
        for i in 0..10 {
            slot.publish(GestureState { openness: i as f32 / 10.0, ..closed_hand() });
        }
        let report = scheduler.tick(1.0, &mut ()).unwrap();
        assert_eq!(report.state.openness, 0.9);
    }

    #[test]
    fn closed_hand_contracts_the_field() {
        let slot = GestureSlot::new();
        let mut scheduler = FrameScheduler::new(&settings(), slot.clone());
        slot.publish(closed_hand());

        let original = scheduler.engine().buffers().original[3];
        for _ in 0..400 {
            scheduler.tick(1.0, &mut ());
        }
        let current = scheduler.engine().buffers().current[3];
        assert!((current - original * MIN_SCALE).norm() < 1e-2);
    }

    #[test]
    fn threshold_mode_eases_binary_scale() {
        let slot = GestureSlot::new();
        let mut s = settings();
        s.gesture_mode = GestureMode::Threshold;
        let mut scheduler = FrameScheduler::new(&s, slot.clone());
        slot.publish(GestureState { openness: 1.0, ..closed_hand() });

        for n in 1..=20 {
            scheduler.tick(1.0, &mut ());
            let expected = 1.0 + 0.5 * (1.0 - 0.95f32.powi(n));
            let b = scheduler.engine().buffers();
            for (c, o) in b.current.iter().zip(&b.original).take(20) {
                assert!((c - o * expected).norm() < 1e-4, "tick {n}");
            }
        }
        for _ in 0..300 {
            scheduler.tick(1.0, &mut ());
        }
        assert!((scheduler.engine().binary_scale() - BINARY_OPEN_SCALE).abs() < 1e-3);
    }

    #[test]
    fn mode_and_sensitivity_commands_switch_response() {
        let mut scheduler = FrameScheduler::new(&settings(), GestureSlot::new());
        let tx = scheduler.command_sender();
        tx.send(ControlCommand::SetGestureMode { mode: GestureMode::Threshold }).unwrap();
        tx.send(ControlCommand::SetGestureSensitivity { sensitivity: 0.25 }).unwrap();
        scheduler.tick(1.0, &mut ());
        assert_eq!(scheduler.mode(), GestureMode::Threshold);
        assert_eq!(scheduler.sensitivity(), 0.25);
    }

    #[test]
    fn stop_is_idempotent_and_halts_ticks() {
        let mut scheduler = FrameScheduler::new(&settings(), GestureSlot::new());
        let mut sink = CountingSink::default();
        scheduler.tick(1.0, &mut sink);

        assert!(scheduler.stop());
        assert!(!scheduler.stop());
        assert!(!scheduler.is_running());
        assert!(scheduler.engine().is_disposed());
        assert_eq!(scheduler.tick(1.0, &mut sink), None);
        assert_eq!(sink.draws, 1);
    }
}
