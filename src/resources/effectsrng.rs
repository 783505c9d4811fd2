//! Randomness used when spawning particle batches.
//!
//! Only spawning draws random numbers; every draw pass is a pure function of
//! time. [`UniformSource`] is the seam: the world holds an [`EffectsRng`]
//! (seedable `fastrand` generator), tests plug in a [`SequenceSource`].

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

/// Uniform float generator over `[0, 1)`.
pub trait UniformSource {
    fn next_f32(&mut self) -> f32;
}

impl UniformSource for Rng {
    fn next_f32(&mut self) -> f32 {
        self.f32()
    }
}

/// World-wide generator for effect spawns.
#[derive(Resource, Debug, Clone)]
pub struct EffectsRng(pub Rng);

impl EffectsRng {
    pub fn with_seed(seed: u64) -> Self {
        Self(Rng::with_seed(seed))
    }

    /// Uniform float in `[min, max)`; returns `min` for an empty range.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        let range = max - min;
        if range < f32::EPSILON {
            return min;
        }
        min + self.0.f32() * range
    }

    pub fn u8(&mut self) -> u8 {
        self.0.u8(..)
    }
}

impl Default for EffectsRng {
    fn default() -> Self {
        Self(Rng::new())
    }
}

impl UniformSource for EffectsRng {
    fn next_f32(&mut self) -> f32 {
        self.0.f32()
    }
}

/// Replays a fixed list of values, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    next: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, next: 0 }
    }
}

impl UniformSource for SequenceSource {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}
