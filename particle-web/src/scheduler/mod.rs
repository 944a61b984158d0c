//! Scheduler module - single-slot gesture hand-off and the frame tick
//!
//! Re-exports only. All logic in submodules.

mod slot;
mod clock;
mod frame;
mod session;

pub use slot::GestureSlot;
pub use clock::{FrameClock, MAX_DT_SCALE};
pub use frame::{FrameReport, FrameScheduler, FrameSink};
pub use session::Session;
