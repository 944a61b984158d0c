//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod console;
mod session;

pub use console::init_logger;
pub use session::{
    // lifecycle
    start_session,
    init_gpu,
    render_frame,
    stop_render,
    stop_camera,
    release_gpu,
    end_session,
    // camera side
    update_hand_landmarks,
    report_detector_error,
    // control surface
    send_command,
    // status
    get_gesture_status,
    get_openness,
    get_fps,
    get_particle_count,
    poll_hand_event,
};
