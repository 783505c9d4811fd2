//! Weapon fire event.
//!
//! Triggered once per shot by
//! [`shooter_system`](crate::systems::shooter::shooter_system). The
//! [`fire_observer`] turns each shot into its two effects: a muzzle flash
//! batch in the [`ParticleBatchPool`] and a plasma projectile in the
//! [`AnimationPool`].

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::particles::ParticleBatchSetup;
use crate::components::projectile::ProjectileLaunch;
use crate::math::Vector2;
use crate::resources::animationpool::AnimationPool;
use crate::resources::effectsrng::EffectsRng;
use crate::resources::gameconfig::GameConfig;
use crate::resources::particlepool::ParticleBatchPool;
use crate::resources::spritestore::{MUZZLE_PARTICLE, SpriteStore};

/// A shot leaving a weapon.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FireEvent {
    /// Muzzle position.
    pub origin: Vector2,
    /// Direction of fire in radians.
    pub angle: f32,
    /// Projectile speed in units per millisecond.
    pub speed: f32,
    pub ms: u32,
}

/// Spawn the muzzle flash and start a projectile for a [`FireEvent`].
///
/// A full particle pool or a busy projectile slot drops that half of the
/// shot; the other half still happens.
pub fn fire_observer(
    trigger: On<FireEvent>,
    config: Res<GameConfig>,
    sprites: Res<SpriteStore>,
    mut particles: ResMut<ParticleBatchPool>,
    mut projectiles: ResMut<AnimationPool>,
    mut rng: ResMut<EffectsRng>,
) {
    let event = trigger.event();

    match sprites.get(MUZZLE_PARTICLE) {
        Some(sprite) => {
            let muzzle = &config.muzzle;
            let setup = ParticleBatchSetup {
                start_position: event.origin,
                center_out_angle: event.angle,
                spread_angle: muzzle.spread,
                min_speed: muzzle.speed_min,
                max_speed: muzzle.speed_max,
                color: muzzle.color,
                ms_start: event.ms,
                ms_duration: muzzle.duration_ms,
                sprite,
            };
            if let Err(e) = particles.spawn(&setup, &mut *rng) {
                debug!("Muzzle flash dropped: {}", e);
            }
        }
        None => warn!("Sprite '{}' missing, no muzzle flash", MUZZLE_PARTICLE),
    }

    let launch = ProjectileLaunch::toward(event.origin, event.angle, event.speed);
    if let Some(slot) = projectiles.spawn_at_next_slot(launch, event.ms) {
        debug!("Projectile fired in slot {} at {} ms", slot, event.ms);
    }
}
