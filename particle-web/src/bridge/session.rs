//! Session entry points - the page drives one visualizer session from JS
//!
//! Camera frames arrive through `update_hand_landmarks`, display refreshes
//! through `render_frame`. Both land on the same thread-local session.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::config::VisualizerSettings;
use crate::error::{ConfigError, DetectorError, GpuError};
use crate::renderer::ParticleRenderer;
use crate::scheduler::Session;

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static SESSION: RefCell<Option<Session<ParticleRenderer>>> = const { RefCell::new(None) };
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<GpuError> for JsValue {
    fn from(err: GpuError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn with_session<T>(f: impl FnOnce(&mut Session<ParticleRenderer>) -> T) -> Option<T> {
    SESSION.with(|cell| cell.borrow_mut().as_mut().map(f))
}

// ============================================================================
// LIFECYCLE
// ============================================================================

/// Start a session from JSON settings (`"{}"` for defaults).
/// Replaces any running session.
#[wasm_bindgen]
pub fn start_session(settings_json: &str) -> Result<(), JsValue> {
    let mut settings = VisualizerSettings::from_json(settings_json)?;
    if settings.seed == 0 {
        settings.seed = js_sys::Date::now() as u64;
    }

    SESSION.with(|cell| {
        let mut slot = cell.borrow_mut();
        if let Some(previous) = slot.as_mut() {
            previous.end();
        }
        *slot = Some(Session::start(settings));
    });
    Ok(())
}

/// Attach WebGPU to the canvas. Rendering is headless until this resolves.
#[wasm_bindgen]
pub async fn init_gpu(canvas_id: String) -> Result<(), JsValue> {
    let renderer = ParticleRenderer::new(&canvas_id).await?;
    with_session(|session| session.attach_sink(renderer))
        .ok_or_else(|| JsValue::from_str("no session running"))
}

/// One display refresh with the `requestAnimationFrame` timestamp.
/// Returns false once rendering has stopped.
#[wasm_bindgen]
pub fn render_frame(timestamp_ms: f64) -> bool {
    with_session(|session| session.frame(timestamp_ms).is_some()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn stop_render() -> bool {
    with_session(|session| session.stop_render()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn stop_camera() -> bool {
    with_session(|session| session.stop_camera()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn release_gpu() -> bool {
    with_session(|session| session.release_gpu()).unwrap_or(false)
}

/// All teardown steps, then drop the session
#[wasm_bindgen]
pub fn end_session() {
    SESSION.with(|cell| {
        if let Some(mut session) = cell.borrow_mut().take() {
            session.end();
        }
    });
}

// ============================================================================
// CAMERA SIDE
// ============================================================================

/// Called from JavaScript with a flat Float32Array of 63 values per hand
/// (21 landmarks × x, y, z). Returns "HandDetected" / "HandLost" on a
/// transition.
#[wasm_bindgen]
pub fn update_hand_landmarks(data: &[f32], num_hands: usize, confidence: f32) -> Option<String> {
    with_session(|session| session.process_flat_landmarks(data, num_hands, confidence))
        .flatten()
        .map(|event| event.name().to_string())
}

/// Camera permission or model load failed; the session keeps rendering
/// with gesture input parked at neutral
#[wasm_bindgen]
pub fn report_detector_error(message: &str) -> bool {
    let error = DetectorError::from_message(message);
    with_session(|session| session.report_detector_failure(error)).unwrap_or(false)
}

// ============================================================================
// CONTROL SURFACE
// ============================================================================

/// `{"type": "set_pattern", "pattern": "torus"}` and friends
#[wasm_bindgen]
pub fn send_command(command_json: &str) -> Result<(), JsValue> {
    match with_session(|session| session.send_command_json(command_json)) {
        Some(Ok(())) => Ok(()),
        Some(Err(e)) => {
            log::warn!("rejected command: {}", e);
            Err(e.into())
        }
        None => Err(JsValue::from_str("no session running")),
    }
}

// ============================================================================
// STATUS READ-OUTS
// ============================================================================

#[wasm_bindgen]
pub fn get_gesture_status() -> String {
    with_session(|session| session.status().label())
        .unwrap_or("Searching")
        .to_string()
}

/// Openness as a whole percentage
#[wasm_bindgen]
pub fn get_openness() -> u32 {
    with_session(|session| (session.gesture_state().openness * 100.0).round() as u32).unwrap_or(50)
}

#[wasm_bindgen]
pub fn get_fps() -> f32 {
    with_session(|session| session.fps()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_particle_count() -> usize {
    with_session(|session| session.particle_count()).unwrap_or(0)
}

/// Next queued "HandDetected" / "HandLost", if any
#[wasm_bindgen]
pub fn poll_hand_event() -> Option<String> {
    with_session(|session| session.poll_hand_event())
        .flatten()
        .map(|event| event.name().to_string())
}
