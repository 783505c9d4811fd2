//! Fixed-capacity pool of particle batches.
//!
//! The pool owns every live [`ParticleBatch`] in a dense `ArrayVec` of
//! [`MAX_BATCHES`] slots, so memory and per-frame work are bounded.
//!
//! # Admission
//!
//! Once full, [`ParticleBatchPool::spawn`] rejects the new batch with
//! [`SpawnError::PoolFull`]; existing batches are never evicted.
//!
//! # Update and render
//!
//! [`ParticleBatchPool::update_and_render`] is one pass that both reclaims
//! expired batches and draws live ones. Reclaiming is a swap-remove: the last
//! batch moves into the freed slot and that slot is examined again, so batch
//! order is not preserved. Order carries no meaning between batches.
//!
//! Each live batch is drawn with additive blending, its tint, and an alpha of
//! `envelope(t) * 255`. Those changes are scoped per batch and restored
//! before the next one.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Resource;
use log::debug;

use crate::components::particles::{ParticleBatch, ParticleBatchSetup, envelope};
use crate::render::{BlendMode, ScopedSpriteState, SpriteRenderer, draw_oriented, scale_alpha};
use crate::resources::effectsrng::UniformSource;

pub const MAX_BATCHES: usize = 256;

/// Reason a spawn was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    /// Every slot is in use.
    PoolFull,
}

impl std::fmt::Display for SpawnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpawnError::PoolFull => write!(f, "particle pool is full ({} batches)", MAX_BATCHES),
        }
    }
}

impl std::error::Error for SpawnError {}

#[derive(Resource, Debug, Default)]
pub struct ParticleBatchPool {
    batches: ArrayVec<ParticleBatch, MAX_BATCHES>,
}

impl ParticleBatchPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample a batch from `setup` and store it.
    ///
    /// When the pool is full nothing is sampled and the batch is dropped.
    pub fn spawn(
        &mut self,
        setup: &ParticleBatchSetup,
        rng: &mut impl UniformSource,
    ) -> Result<(), SpawnError> {
        if self.batches.is_full() {
            return Err(SpawnError::PoolFull);
        }
        let batch = ParticleBatch::sample(setup, rng);
        self.batches
            .try_push(batch)
            .map_err(|_| SpawnError::PoolFull)
    }

    /// Reclaim expired batches and draw the live ones at `ms_now`.
    pub fn update_and_render<R: SpriteRenderer + ?Sized>(&mut self, renderer: &mut R, ms_now: u32) {
        let mut i = 0;
        let mut reclaimed = 0;
        while i < self.batches.len() {
            if self.batches[i].is_expired(ms_now) {
                self.batches.swap_remove(i);
                reclaimed += 1;
                continue;
            }
            draw_batch(renderer, &self.batches[i], ms_now);
            i += 1;
        }
        if reclaimed > 0 {
            debug!("Reclaimed {} expired particle batches", reclaimed);
        }
    }

    pub fn batches(&self) -> &[ParticleBatch] {
        &self.batches
    }

    /// Number of live batches.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.batches.is_full()
    }

    pub fn capacity(&self) -> usize {
        MAX_BATCHES
    }

    pub fn clear(&mut self) {
        self.batches.clear();
    }
}

fn draw_batch<R: SpriteRenderer + ?Sized>(renderer: &mut R, batch: &ParticleBatch, ms_now: u32) {
    let fact = envelope(batch.progress(ms_now));

    let mut scope = ScopedSpriteState::new(renderer, batch.sprite.id);
    scope.apply(|state| {
        state.alpha = scale_alpha(255, fact);
        state.color = batch.color;
        state.blend = BlendMode::Additive;
    });

    for particle in &batch.particles {
        let position = batch.particle_position(particle, ms_now);
        draw_oriented(&mut *scope, &batch.sprite, position, particle.angle);
    }
}
