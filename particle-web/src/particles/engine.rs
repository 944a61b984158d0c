//! Particle engine - owns the particle buffers and moves them every frame
//!
//! Kinematic only: each frame targets are rebuilt from the pattern and the
//! latest gesture, then `current` eases toward them by a fixed fraction.
//! No velocity survives between frames.

use std::f32::consts::TAU;

use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::buffers::ParticleBuffers;
use super::color::{gradient_color, Rgb};
use crate::patterns::{self, PatternKind, DEFAULT_RADIUS};

// ============================================================================
// TUNING CONSTANTS
// ============================================================================

/// Target scale for a closed fist
pub const MIN_SCALE: f32 = 0.3;
/// Target scale for a fully open hand
pub const MAX_SCALE: f32 = 2.0;
const SCALE_RANGE: f32 = 1.7;

/// Openness above which targets start to scatter
pub const DISPERSION_THRESHOLD: f32 = 0.7;
const DISPERSION_STRENGTH: f32 = 10.0;

/// World units the field drags per unit of hand offset from center
const HAND_DRAG: f32 = 10.0;

/// Per-frame fraction of the remaining distance covered by `current`
pub const INTERPOLATION_FACTOR: f32 = 0.05;

const FLOAT_AMPLITUDE: f32 = 0.1;
const FLOAT_FREQUENCY: f32 = 2.0;
const FRAMES_PER_SECOND: f32 = 60.0;
/// One full float oscillation; the animation clock wraps here
const FLOAT_PERIOD: f32 = TAU / FLOAT_FREQUENCY;

/// Binary mode scales
pub const BINARY_OPEN_SCALE: f32 = 1.5;
pub const BINARY_CLOSED_SCALE: f32 = 0.3;

// ============================================================================
// CREATION PARAMETERS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct EngineParams {
    pub pattern: PatternKind,
    pub count: usize,
    pub radius: f32,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub animation_speed: f32,
    pub seed: u64,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            pattern: PatternKind::Sphere,
            count: 5000,
            radius: DEFAULT_RADIUS,
            primary: Rgb::new(0.0, 0.831, 1.0),
            secondary: Rgb::new(1.0, 0.0, 0.667),
            animation_speed: 1.0,
            seed: 0,
        }
    }
}

// ============================================================================
// ENGINE
// ============================================================================

pub struct ParticleEngine {
    buffers: ParticleBuffers,
    pattern: PatternKind,
    radius: f32,
    primary: Rgb,
    secondary: Rgb,
    animation_speed: f32,
    /// Animation clock in seconds, already scaled by speed, wrapped to one
    /// float period
    elapsed: f32,
    /// Global scale of the field, eased by `advance` in binary mode
    binary_scale: f32,
    /// Open or closed scale from the last binary reading; `None` holds
    binary_goal: Option<f32>,
    rng: Pcg32,
}

impl ParticleEngine {
    pub fn create(params: EngineParams) -> Self {
        let mut rng = Pcg32::seed_from_u64(params.seed);
        let count = params.count.max(1);
        let radius = sanitize_radius(params.radius);

        let pattern = patterns::generate(params.pattern, count, radius, &mut rng);
        let buffers = ParticleBuffers::allocate(pattern, &mut rng);

        let mut engine = Self {
            buffers,
            pattern: params.pattern,
            radius,
            primary: params.primary,
            secondary: params.secondary,
            animation_speed: sanitize_speed(params.animation_speed),
            elapsed: 0.0,
            binary_scale: 1.0,
            binary_goal: None,
            rng,
        };
        engine.recolor();

        log::debug!("particle engine created: {} x {}", count, engine.pattern);
        engine
    }

    // ========================================================================
    // CONTROL SURFACE
    // ========================================================================

    /// Swap pattern; `current` morphs toward the new layout
    pub fn set_pattern(&mut self, kind: PatternKind) {
        let pattern = patterns::generate(kind, self.count(), self.radius, &mut self.rng);
        self.buffers.retarget(pattern);
        self.pattern = kind;
        log::debug!("pattern -> {}", kind);
    }

    /// Reallocate for `count` particles. Positions restart on the pattern.
    pub fn set_count(&mut self, count: usize) {
        let count = count.max(1);
        let pattern = patterns::generate(self.pattern, count, self.radius, &mut self.rng);
        self.buffers = ParticleBuffers::allocate(pattern, &mut self.rng);
        self.recolor();
        log::debug!("particle count -> {}", count);
    }

    pub fn set_colors(&mut self, primary: Rgb, secondary: Rgb) {
        self.primary = primary;
        self.secondary = secondary;
        self.recolor();
        log::debug!("colors -> {} / {}", primary, secondary);
    }

    pub fn set_animation_speed(&mut self, speed: f32) {
        self.animation_speed = sanitize_speed(speed);
    }

    fn recolor(&mut self) {
        let count = self.count();
        for (i, color) in self.buffers.base_colors.iter_mut().enumerate() {
            *color = gradient_color(self.primary, self.secondary, i, count);
        }
    }

    // ========================================================================
    // PER FRAME
    // ========================================================================

    /// Rebuild every target from its pattern position and the hand:
    /// scale by openness, scatter above 0.7, drag with the palm.
    pub fn apply_gesture(&mut self, openness: f32, position: (f32, f32), sensitivity: f32) {
        let openness = clamp_unit(openness, 0.5);
        let sensitivity = clamp_unit(sensitivity, 0.0);
        let (px, py) = (clamp_unit(position.0, 0.5), clamp_unit(position.1, 0.5));

        let scale = MIN_SCALE + openness * SCALE_RANGE;
        let dispersion = if openness > DISPERSION_THRESHOLD {
            (openness - DISPERSION_THRESHOLD) * sensitivity * DISPERSION_STRENGTH
        } else {
            0.0
        };
        // Screen y grows downward, world y grows upward
        let drag = Vector3::new(px - 0.5, 0.5 - py, 0.0) * (HAND_DRAG * sensitivity);

        // A later switch to binary mode eases on from this scale
        self.binary_scale = scale;
        self.binary_goal = None;

        let rng = &mut self.rng;
        for (target, original) in self.buffers.target.iter_mut().zip(&self.buffers.original) {
            let mut t = original * scale;
            if dispersion > 0.0 {
                t += Vector3::new(
                    rng.random::<f32>() - 0.5,
                    rng.random::<f32>() - 0.5,
                    rng.random::<f32>() - 0.5,
                ) * dispersion;
            }
            *target = t + drag;
        }
    }

    /// Reduced two-state response: the field heads for 1.5x (open) or
    /// 0.3x (closed). Without a reading the last goal is kept; before the
    /// first reading the current scale holds. `advance` does the easing.
    pub fn apply_binary_gesture(&mut self, hand_open: Option<bool>) {
        if let Some(open) = hand_open {
            self.binary_goal = Some(if open { BINARY_OPEN_SCALE } else { BINARY_CLOSED_SCALE });
        }

        let scale = self.binary_goal.unwrap_or(self.binary_scale);
        for (target, original) in self.buffers.target.iter_mut().zip(&self.buffers.original) {
            *target = original * scale;
        }
    }

    /// Ease `current` toward `target` and refresh the float offsets.
    /// `dt_scale` is elapsed time in 60 Hz frames.
    pub fn advance(&mut self, dt_scale: f32) {
        let dt = if dt_scale.is_finite() { dt_scale.max(0.0) } else { 0.0 };
        let step = (INTERPOLATION_FACTOR * self.animation_speed * dt).min(1.0);
        self.elapsed = (self.elapsed + dt / FRAMES_PER_SECOND * self.animation_speed)
            .rem_euclid(FLOAT_PERIOD);

        if let Some(goal) = self.binary_goal {
            self.binary_scale += (goal - self.binary_scale) * step;
        }

        let buffers = &mut self.buffers;
        for (current, target) in buffers.current.iter_mut().zip(&buffers.target) {
            *current += (target - *current) * step;
        }

        let amplitude = FLOAT_AMPLITUDE * self.animation_speed;
        let phase_time = self.elapsed * FLOAT_FREQUENCY;
        for (offset, phase) in buffers.float_offsets.iter_mut().zip(&buffers.phases) {
            *offset = (phase_time + phase).sin() * amplitude;
        }
    }

    /// Drop all particle storage
    pub fn dispose(&mut self) {
        self.buffers = ParticleBuffers::default();
        log::debug!("particle engine disposed");
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn count(&self) -> usize {
        self.buffers.len()
    }

    pub fn pattern(&self) -> PatternKind {
        self.pattern
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn colors(&self) -> (Rgb, Rgb) {
        (self.primary, self.secondary)
    }

    pub fn animation_speed(&self) -> f32 {
        self.animation_speed
    }

    pub fn binary_scale(&self) -> f32 {
        self.binary_scale
    }

    pub fn buffers(&self) -> &ParticleBuffers {
        &self.buffers
    }

    pub fn is_disposed(&self) -> bool {
        self.buffers.is_empty()
    }
}

fn clamp_unit(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

fn sanitize_speed(speed: f32) -> f32 {
    if speed.is_finite() && speed > 0.0 {
        speed
    } else {
        1.0
    }
}

fn sanitize_radius(radius: f32) -> f32 {
    if radius.is_finite() && radius > 0.0 {
        radius
    } else {
        DEFAULT_RADIUS
    }
}
