//! Struct-of-arrays particle storage
//!
//! All per-particle arrays share one length. They are only ever reallocated
//! together, through [`ParticleBuffers::allocate`].

use std::f32::consts::TAU;

use nalgebra::Vector3;
use rand::Rng;

use super::color::Rgb;

const MIN_SIZE: f32 = 0.5;
const MAX_SIZE: f32 = 1.5;

#[derive(Clone, Debug, Default)]
pub struct ParticleBuffers {
    /// Pattern position at generation time
    pub original: Vec<Vector3<f32>>,
    /// Where each particle is heading this frame
    pub target: Vec<Vector3<f32>>,
    /// Interpolated position
    pub current: Vec<Vector3<f32>>,
    pub base_colors: Vec<Rgb>,
    pub sizes: Vec<f32>,
    /// Seed for the floating oscillation, 0-2π
    pub phases: Vec<f32>,
    /// Vertical float offset from the last advance, added on top of `current`
    pub float_offsets: Vec<f32>,
}

impl ParticleBuffers {
    /// Reallocate every array for `pattern.len()` particles.
    /// `current` starts on the pattern, so there is no morph after a resize.
    pub fn allocate<R: Rng + ?Sized>(pattern: Vec<Vector3<f32>>, rng: &mut R) -> Self {
        let count = pattern.len();

        let sizes = (0..count)
            .map(|_| MIN_SIZE + rng.random::<f32>() * (MAX_SIZE - MIN_SIZE))
            .collect();
        let phases = (0..count).map(|_| rng.random::<f32>() * TAU).collect();

        Self {
            target: pattern.clone(),
            current: pattern.clone(),
            original: pattern,
            base_colors: vec![Rgb::default(); count],
            sizes,
            phases,
            float_offsets: vec![0.0; count],
        }
    }

    /// Replace the pattern in place, leaving `current` where it is
    pub fn retarget(&mut self, pattern: Vec<Vector3<f32>>) {
        debug_assert_eq!(pattern.len(), self.len());
        self.target.clone_from(&pattern);
        self.original = pattern;
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Position actually drawn: interpolated position plus float offset
    pub fn rendered_position(&self, index: usize) -> Vector3<f32> {
        let mut pos = self.current[index];
        pos.y += self.float_offsets[index];
        pos
    }

    pub fn lengths_agree(&self) -> bool {
        let n = self.len();
        self.target.len() == n
            && self.current.len() == n
            && self.base_colors.len() == n
            && self.sizes.len() == n
            && self.phases.len() == n
            && self.float_offsets.len() == n
    }
}
