//! Ambient spark system.
//!
//! Sprinkles small randomly coloured particle batches over the whole window:
//! each frame a random number of batches in `[0, max_per_frame)`, each at a
//! random position flying out in a random direction.

use bevy_ecs::prelude::*;
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::components::color::Rgba;
use crate::components::particles::ParticleBatchSetup;
use crate::events::burst::BurstEvent;
use crate::math::Vector2;
use crate::resources::effectsrng::{EffectsRng, UniformSource};
use crate::resources::gameconfig::GameConfig;
use crate::resources::spritestore::{SPARK, SpriteStore};
use crate::resources::worldtime::WorldTime;

const SPARK_SPREAD: f32 = FRAC_PI_2;
const SPARK_SPEED_MIN: f32 = 0.0;
const SPARK_SPEED_MAX: f32 = 0.05;

pub fn ambient_sparks_system(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    sprites: Res<SpriteStore>,
    mut rng: ResMut<EffectsRng>,
    mut commands: Commands,
) {
    if config.sparks_per_frame == 0 {
        return;
    }
    let Some(sprite) = sprites.get(SPARK) else {
        return;
    };
    let (width, height) = config.window_size();

    let count = (rng.next_f32() * config.sparks_per_frame as f32) as u32;
    for _ in 0..count {
        let setup = ParticleBatchSetup {
            start_position: Vector2::new(
                rng.range_f32(0.0, width as f32),
                rng.range_f32(0.0, height as f32),
            ),
            center_out_angle: rng.range_f32(0.0, TAU),
            spread_angle: SPARK_SPREAD,
            min_speed: SPARK_SPEED_MIN,
            max_speed: SPARK_SPEED_MAX,
            color: Rgba::new(rng.u8(), rng.u8(), rng.u8(), 255),
            ms_start: time.now_ms,
            ms_duration: config.sparks_duration_ms,
            sprite,
        };
        commands.trigger(BurstEvent { setup });
    }
}
