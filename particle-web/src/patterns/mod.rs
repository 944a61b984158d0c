//! Pattern module - spatial layouts for the particle field
//!
//! Re-exports only. All logic in submodules.

mod kind;
mod generate;

pub use kind::{PatternKind, ParsePatternError};
pub use generate::{generate, DEFAULT_RADIUS, WAVE_COLUMNS};
