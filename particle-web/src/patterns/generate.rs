//! Pattern generation - maps (kind, count, radius) to particle positions
//!
//! Stateless. Random kinds draw from the caller's RNG; spiral, wave and dna
//! use index-derived noise so they repeat exactly for the same inputs.

use std::f32::consts::{PI, TAU};

use nalgebra::Vector3;
use rand::Rng;

use super::PatternKind;

/// Default scale of every pattern in world units
pub const DEFAULT_RADIUS: f32 = 10.0;

/// Column count of the implicit grid used by the wave pattern
pub const WAVE_COLUMNS: usize = 100;

// ============================================================================
// ENTRY POINT
// ============================================================================

/// Generate `count` positions for `kind`, scaled by `radius`
pub fn generate<R: Rng + ?Sized>(
    kind: PatternKind,
    count: usize,
    radius: f32,
    rng: &mut R,
) -> Vec<Vector3<f32>> {
    let mut positions = Vec::with_capacity(count);

    for i in 0..count {
        let t = i as f32 / count as f32;
        let pos = match kind {
            PatternKind::Sphere => sphere(radius, rng),
            PatternKind::Cube | PatternKind::RandomCloud => uniform_box(radius, rng),
            PatternKind::Torus => torus(radius, rng),
            PatternKind::Spiral => spiral(i, t, radius),
            PatternKind::Galaxy => galaxy(radius, rng),
            PatternKind::Heart => heart(t, radius, rng),
            PatternKind::Dna => dna(i, t, radius),
            PatternKind::Wave => wave(i, count, radius),
        };
        positions.push(pos);
    }

    positions
}

// ============================================================================
// RANDOM LAYOUTS
// ============================================================================

/// Uniform by volume: cube-root radius, arccos polar angle
fn sphere<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vector3<f32> {
    let u: f32 = rng.random();
    let v: f32 = rng.random();
    let w: f32 = rng.random();

    let phi = (2.0 * u - 1.0).clamp(-1.0, 1.0).acos();
    let theta = TAU * v;
    let r = radius * w.cbrt();

    Vector3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

fn uniform_box<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vector3<f32> {
    Vector3::new(
        (rng.random::<f32>() * 2.0 - 1.0) * radius,
        (rng.random::<f32>() * 2.0 - 1.0) * radius,
        (rng.random::<f32>() * 2.0 - 1.0) * radius,
    )
}

fn torus<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vector3<f32> {
    let major = radius * 0.8;
    let minor = radius * 0.3 * rng.random::<f32>();
    let u = rng.random::<f32>() * TAU;
    let v = rng.random::<f32>() * TAU;

    Vector3::new(
        (major + minor * v.cos()) * u.cos(),
        minor * v.sin(),
        (major + minor * v.cos()) * u.sin(),
    )
}

/// Three arms; swirl grows with distance, scatter shrinks with it
fn galaxy<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vector3<f32> {
    const ARMS: u32 = 3;
    const SWIRL: f32 = 2.5;

    let arm = rng.random_range(0..ARMS);
    let distance = rng.random::<f32>() * radius;
    let falloff = if radius > 0.0 { 1.0 - distance / radius } else { 1.0 };

    let base = arm as f32 * TAU / ARMS as f32;
    let swirl = if radius > 0.0 { distance / radius * SWIRL } else { 0.0 };
    let scatter = (rng.random::<f32>() - 0.5) * 0.6 * falloff;
    let angle = base + swirl + scatter;

    let height = (rng.random::<f32>() - 0.5) * 0.1 * radius * falloff;

    Vector3::new(angle.cos() * distance, height, angle.sin() * distance)
}

fn heart<R: Rng + ?Sized>(t: f32, radius: f32, rng: &mut R) -> Vector3<f32> {
    let a = t * TAU;
    let scale = radius / 16.0;

    let x = 16.0 * a.sin().powi(3);
    let y = 13.0 * a.cos() - 5.0 * (2.0 * a).cos() - 2.0 * (3.0 * a).cos() - (4.0 * a).cos();

    let noise = 0.05 * radius;
    Vector3::new(
        x * scale + (rng.random::<f32>() - 0.5) * noise,
        y * scale + (rng.random::<f32>() - 0.5) * noise,
        (rng.random::<f32>() - 0.5) * 0.3 * radius,
    )
}

// ============================================================================
// DETERMINISTIC LAYOUTS
// ============================================================================

/// Hash-style noise in [-0.5, 0.5), stable per (index, axis)
fn index_noise(i: usize, axis: u32) -> f32 {
    let seed = i as f32 * 12.9898 + axis as f32 * 78.233;
    let v = (seed.sin() * 43_758.547).fract();
    v.abs() - 0.5
}

fn spiral(i: usize, t: f32, radius: f32) -> Vector3<f32> {
    let angle = t * 4.0 * TAU;
    let r = t * radius;
    let jitter = 0.05 * radius;

    Vector3::new(
        angle.cos() * r + index_noise(i, 0) * jitter,
        (t - 0.5) * 2.0 * radius + index_noise(i, 1) * jitter,
        angle.sin() * r + index_noise(i, 2) * jitter,
    )
}

/// Two strands, alternating by parity, three turns top to bottom
fn dna(i: usize, t: f32, radius: f32) -> Vector3<f32> {
    const TURNS: f32 = 3.0;

    let strand_offset = if i % 2 == 0 { 0.0 } else { PI };
    let angle = t * TURNS * TAU + strand_offset;
    let helix_radius = radius * 0.4;

    Vector3::new(
        angle.cos() * helix_radius,
        (t - 0.5) * 2.0 * radius,
        angle.sin() * helix_radius,
    )
}

fn wave(i: usize, count: usize, radius: f32) -> Vector3<f32> {
    let rows = count.div_ceil(WAVE_COLUMNS).max(1);
    let col = i % WAVE_COLUMNS;
    let row = i / WAVE_COLUMNS;

    let u = col as f32 / (WAVE_COLUMNS - 1) as f32;
    let v = if rows > 1 { row as f32 / (rows - 1) as f32 } else { 0.5 };

    let x = (u - 0.5) * 2.0 * radius;
    let z = (v - 0.5) * 2.0 * radius;
    let y = (u * TAU).sin() * (v * TAU).cos() * radius * 0.3 + index_noise(i, 1) * 0.02 * radius;

    Vector3::new(x, y, z)
}
