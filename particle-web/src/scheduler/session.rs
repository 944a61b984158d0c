//! Session - everything one visualizer page owns, torn down in three steps
//!
//! The render loop, the camera/gesture side and the GPU surface stop
//! independently; each teardown step is idempotent and may run in any order.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use super::clock::FrameClock;
use super::frame::{FrameReport, FrameScheduler, FrameSink};
use super::slot::GestureSlot;
use crate::config::{ControlCommand, VisualizerSettings};
use crate::error::{ConfigError, DetectorError};
use crate::gesture::{GesturePipeline, GestureState, HandEvent, HandSample, HandStatus};

/// Hand events kept for `poll_hand_event`; older ones are dropped first
pub const EVENT_BACKLOG: usize = 16;

pub struct Session<S: FrameSink> {
    scheduler: FrameScheduler,
    pipeline: GesturePipeline,
    commands: Sender<ControlCommand>,
    events: Receiver<HandEvent>,
    backlog: VecDeque<HandEvent>,
    clock: FrameClock,
    sink: Option<S>,
    camera_active: bool,
}

impl<S: FrameSink> Session<S> {
    pub fn start(settings: VisualizerSettings) -> Self {
        let slot = GestureSlot::new();
        let scheduler = FrameScheduler::new(&settings, slot.clone());
        let mut pipeline =
            GesturePipeline::new(settings.gesture_mode, settings.gesture_sensitivity, slot);
        let events = pipeline.subscribe();
        let commands = scheduler.command_sender();

        log::info!(
            "✅ session started: {} particles, {} pattern, {} mode",
            settings.particle_count,
            settings.pattern,
            settings.gesture_mode.name()
        );

        Self {
            scheduler,
            pipeline,
            commands,
            events,
            backlog: VecDeque::with_capacity(EVENT_BACKLOG),
            clock: FrameClock::new(),
            sink: None,
            camera_active: true,
        }
    }

    /// Attach the drawing surface once it is ready; replaces any previous one
    pub fn attach_sink(&mut self, sink: S) {
        self.sink = Some(sink);
    }

    // ========================================================================
    // CONTROL SURFACE
    // ========================================================================

    /// Queue a command for the next frame. Gesture settings also reach the
    /// estimator immediately so the next camera frame uses them.
    /// Rejected once rendering has stopped, since no frame would apply it.
    pub fn send_command(&mut self, command: ControlCommand) -> Result<(), ConfigError> {
        if !self.scheduler.is_running() {
            return Err(ConfigError::RenderingStopped);
        }
        let command = command.validate()?;
        match command {
            ControlCommand::SetGestureMode { mode } => self.pipeline.set_mode(mode),
            ControlCommand::SetGestureSensitivity { sensitivity } => {
                self.pipeline.set_sensitivity(sensitivity)
            }
            _ => {}
        }
        // The receiver lives in the scheduler we own, so this cannot fail
        let _ = self.commands.send(command);
        Ok(())
    }

    pub fn send_command_json(&mut self, json: &str) -> Result<(), ConfigError> {
        self.send_command(ControlCommand::from_json(json)?)
    }

    // ========================================================================
    // CAMERA SIDE
    // ========================================================================

    /// One processed camera frame; ignored after `stop_camera`
    pub fn process_landmarks(&mut self, sample: Option<&HandSample>) -> Option<HandEvent> {
        if !self.camera_active {
            return None;
        }
        let event = self.pipeline.process_frame(sample);
        self.collect_events();
        event
    }

    pub fn process_flat_landmarks(
        &mut self,
        data: &[f32],
        num_hands: usize,
        confidence: f32,
    ) -> Option<HandEvent> {
        if !self.camera_active {
            return None;
        }
        let event = self.pipeline.process_flat(data, num_hands, confidence);
        self.collect_events();
        event
    }

    pub fn report_detector_failure(&mut self, error: DetectorError) -> bool {
        let reported = self.pipeline.report_detector_failure(error);
        self.collect_events();
        reported
    }

    /// Oldest unread HandDetected / HandLost, if any
    pub fn poll_hand_event(&mut self) -> Option<HandEvent> {
        self.collect_events();
        self.backlog.pop_front()
    }

    /// Move fanned-out events into the bounded backlog
    fn collect_events(&mut self) {
        for event in self.events.try_iter() {
            if self.backlog.len() == EVENT_BACKLOG {
                self.backlog.pop_front();
            }
            self.backlog.push_back(event);
        }
    }

    // ========================================================================
    // RENDER SIDE
    // ========================================================================

    /// Tick with a display timestamp in milliseconds
    pub fn frame(&mut self, timestamp_ms: f64) -> Option<FrameReport> {
        if !self.scheduler.is_running() {
            return None;
        }
        let dt_scale = self.clock.tick(timestamp_ms);
        self.tick(dt_scale)
    }

    /// Tick with an explicit step. Without a surface the engine still animates.
    pub fn tick(&mut self, dt_scale: f32) -> Option<FrameReport> {
        match self.sink.as_mut() {
            Some(sink) => self.scheduler.tick(dt_scale, sink),
            None => self.scheduler.tick(dt_scale, &mut ()),
        }
    }

    // ========================================================================
    // TEARDOWN
    // ========================================================================

    pub fn stop_render(&mut self) -> bool {
        self.scheduler.stop()
    }

    /// Stop consuming camera frames and park the gesture signal at neutral
    pub fn stop_camera(&mut self) -> bool {
        if !self.camera_active {
            return false;
        }
        self.camera_active = false;
        if self.pipeline.is_tracking() {
            self.pipeline.process_frame(None);
            self.collect_events();
        }
        self.pipeline.slot().publish(GestureState::NEUTRAL);
        log::info!("📷 camera input stopped");
        true
    }

    pub fn release_gpu(&mut self) -> bool {
        match self.sink.take() {
            Some(sink) => {
                drop(sink);
                log::info!("GPU resources released");
                true
            }
            None => false,
        }
    }

    /// All three teardown steps
    pub fn end(&mut self) {
        self.stop_render();
        self.stop_camera();
        self.release_gpu();
    }

    // ========================================================================
    // STATUS READ-OUTS
    // ========================================================================

    pub fn gesture_state(&self) -> GestureState {
        self.pipeline.slot().read()
    }

    pub fn status(&self) -> HandStatus {
        self.gesture_state().status()
    }

    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }

    pub fn particle_count(&self) -> usize {
        self.scheduler.engine().count()
    }

    pub fn is_rendering(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn is_camera_active(&self) -> bool {
        self.camera_active
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn pipeline(&self) -> &GesturePipeline {
        &self.pipeline
    }
}
