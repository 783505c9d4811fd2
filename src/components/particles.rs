//! Particle batch data.
//!
//! A [`ParticleBatch`] is one burst (muzzle flash, explosion, spark) of
//! [`PARTICLES_PER_BATCH`] particles sharing an origin, a lifetime window, a
//! tint and a sprite. Each particle only stores its velocity and a fixed spin;
//! its position at any time is `start_position + dt * velocity`, so a batch
//! never needs a per-frame update.
//!
//! Batches are created from a [`ParticleBatchSetup`] by
//! [`ParticleBatchPool::spawn`](crate::resources::particlepool::ParticleBatchPool::spawn)
//! and live in the pool until they expire.

use arrayvec::ArrayVec;
use std::f32::consts::TAU;

use crate::components::color::Rgba;
use crate::components::sprite::SpriteHandle;
use crate::math::Vector2;
use crate::resources::effectsrng::UniformSource;
use crate::resources::worldtime::ms_since;

pub const PARTICLES_PER_BATCH: usize = 30;

/// One particle of a batch. Immutable once sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSample {
    /// Velocity in world units per millisecond.
    pub velocity: Vector2,
    /// Rotation in radians. Sampled once; the particle keeps it for its
    /// whole life.
    pub angle: f32,
}

/// Caller-built description of a batch to spawn.
#[derive(Debug, Clone, Copy)]
pub struct ParticleBatchSetup {
    pub start_position: Vector2,
    /// Direction the batch flies out to, in radians.
    pub center_out_angle: f32,
    /// Width of the direction cone, in radians, centred on `center_out_angle`.
    pub spread_angle: f32,
    /// Minimum speed in units per millisecond.
    pub min_speed: f32,
    /// Maximum speed in units per millisecond. Must be `>= min_speed`.
    pub max_speed: f32,
    pub color: Rgba,
    pub ms_start: u32,
    /// Lifetime in milliseconds. Must be non-zero.
    pub ms_duration: u32,
    pub sprite: SpriteHandle,
}

#[derive(Debug, Clone)]
pub struct ParticleBatch {
    pub sprite: SpriteHandle,
    pub start_position: Vector2,
    pub color: Rgba,
    pub ms_start: u32,
    pub ms_duration: u32,
    pub particles: ArrayVec<ParticleSample, PARTICLES_PER_BATCH>,
}

impl ParticleBatch {
    /// Sample a full batch from `setup`, drawing three uniforms per particle
    /// (direction, speed, spin).
    pub fn sample(setup: &ParticleBatchSetup, rng: &mut impl UniformSource) -> Self {
        debug_assert!(setup.ms_duration > 0, "particle batch needs a duration");
        debug_assert!(setup.min_speed <= setup.max_speed);

        let base_angle = setup.center_out_angle - setup.spread_angle * 0.5;
        let speed_range = setup.max_speed - setup.min_speed;

        let mut particles = ArrayVec::new();
        for _ in 0..PARTICLES_PER_BATCH {
            let angle = base_angle + rng.next_f32() * setup.spread_angle;
            let speed = setup.min_speed + rng.next_f32() * speed_range;
            particles.push(ParticleSample {
                velocity: Vector2::from_angle(angle) * speed,
                angle: rng.next_f32() * TAU,
            });
        }

        Self {
            sprite: setup.sprite,
            start_position: setup.start_position,
            color: setup.color,
            ms_start: setup.ms_start,
            ms_duration: setup.ms_duration,
            particles,
        }
    }

    /// Milliseconds since the batch started, across a clock wrap. A start in
    /// the future counts as zero.
    pub fn elapsed(&self, ms_now: u32) -> u32 {
        ms_since(ms_now, self.ms_start).unwrap_or(0)
    }

    /// Alive while `elapsed <= ms_duration`, both ends included.
    pub fn is_expired(&self, ms_now: u32) -> bool {
        self.elapsed(ms_now) > self.ms_duration
    }

    /// Normalized age in `[0, 1]` for a live batch.
    pub fn progress(&self, ms_now: u32) -> f32 {
        self.elapsed(ms_now) as f32 / self.ms_duration as f32
    }

    pub fn particle_position(&self, particle: &ParticleSample, ms_now: u32) -> Vector2 {
        self.start_position + particle.velocity * self.elapsed(ms_now) as f32
    }
}

/// Fade-in/fade-out intensity: `-4t(t-1)`.
///
/// Zero at `t = 0` and `t = 1`, peaks at 1.0 for `t = 0.5`.
pub fn envelope(t: f32) -> f32 {
    -4.0 * t * (t - 1.0)
}
