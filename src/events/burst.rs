//! Generic particle burst event.
//!
//! Any system can ask for a particle batch without holding the pool or the
//! generator: trigger a [`BurstEvent`] with the setup and [`burst_observer`]
//! samples and stores it.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::particles::ParticleBatchSetup;
use crate::resources::effectsrng::EffectsRng;
use crate::resources::particlepool::ParticleBatchPool;

#[derive(Event, Debug, Clone, Copy)]
pub struct BurstEvent {
    pub setup: ParticleBatchSetup,
}

pub fn burst_observer(
    trigger: On<BurstEvent>,
    mut particles: ResMut<ParticleBatchPool>,
    mut rng: ResMut<EffectsRng>,
) {
    if let Err(e) = particles.spawn(&trigger.event().setup, &mut *rng) {
        debug!("Burst dropped: {}", e);
    }
}
